#![allow(dead_code)]

use shaderforge::fs::mock::MockFileSystem;

/// Builder for descriptor (`.shd`) text.
#[derive(Debug, Clone, Default)]
pub struct DescriptorBuilder {
    defines: Vec<String>,
    passes: Vec<(String, Vec<String>, Vec<String>)>,
}

impl DescriptorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(mut self, name: &str) -> Self {
        self.defines.push(name.to_string());
        self
    }

    /// Add a pass with its vertex and fragment define lists.
    pub fn pass(mut self, name: &str, vertex: &[&str], fragment: &[&str]) -> Self {
        self.passes.push((
            name.to_string(),
            vertex.iter().map(|s| s.to_string()).collect(),
            fragment.iter().map(|s| s.to_string()).collect(),
        ));
        self
    }

    pub fn build(&self) -> String {
        let list = |items: &[String]| {
            items
                .iter()
                .map(|s| format!("\"{s}\""))
                .collect::<Vec<_>>()
                .join(", ")
        };

        let mut out = format!("defines = [{}]\n", list(&self.defines));
        for (name, vertex, fragment) in &self.passes {
            out.push_str(&format!(
                "\n[[pass]]\nname = \"{}\"\nvertex_defines = [{}]\nfragment_defines = [{}]\n",
                name,
                list(vertex),
                list(fragment)
            ));
        }
        out
    }
}

/// Write a descriptor and both of its stage sources under `root`.
pub fn add_shader(fs: &MockFileSystem, root: &str, basename: &str, descriptor: &DescriptorBuilder) {
    fs.add_file(format!("{root}/{basename}.shd"), descriptor.build());
    fs.add_file(format!("{root}/{basename}_vs.sc"), "void main() {}");
    fs.add_file(format!("{root}/{basename}_fs.sc"), "void main() {}");
}

/// Descriptor with a single `MAIN` pass and one define used by both stages.
pub fn single_pass_descriptor() -> DescriptorBuilder {
    DescriptorBuilder::new()
        .define("SKINNED")
        .pass("MAIN", &["SKINNED"], &["SKINNED"])
}
