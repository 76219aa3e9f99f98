use proptest::prelude::*;

use shaderforge::shader::{plan_variants, DefineMask, ShaderDescriptor, MAX_DEFINES};
use shaderforge::types::ShaderStage;
use shaderforge_test_utils::builders::DescriptorBuilder;

#[test]
fn subsets_of_empty_mask_is_only_zero() {
    let masks: Vec<u32> = DefineMask::subsets(DefineMask::EMPTY, 4).map(DefineMask::bits).collect();
    assert_eq!(masks, vec![0]);
}

#[test]
fn subsets_are_ascending() {
    let masks: Vec<u32> = DefineMask::subsets(DefineMask::from_bits(0b101), 3)
        .map(DefineMask::bits)
        .collect();
    assert_eq!(masks, vec![0, 1, 4, 5]);
}

proptest! {
    #[test]
    fn subsets_match_the_subset_law(define_count in 0usize..=8, local in 0u32..256) {
        let local = DefineMask::from_bits(local & ((1u32 << define_count) - 1));
        let yielded: Vec<u32> = DefineMask::subsets(local, define_count).map(DefineMask::bits).collect();
        let expected: Vec<u32> = (0u32..(1 << define_count))
            .filter(|m| m & !local.bits() == 0)
            .collect();

        prop_assert_eq!(&yielded, &expected);
        prop_assert_eq!(yielded.len(), 1usize << local.bits().count_ones());
    }

    #[test]
    fn planned_variants_cover_each_stage_subset(
        define_count in 1usize..=5,
        vertex in 0u32..32,
        fragment in 0u32..32,
    ) {
        let names: Vec<String> = (0..define_count).map(|i| format!("D{i}")).collect();
        let pick = |bits: u32| -> Vec<&str> {
            names
                .iter()
                .enumerate()
                .filter(|(i, _)| bits & (1 << i) != 0)
                .map(|(_, n)| n.as_str())
                .collect()
        };
        let mut builder = DescriptorBuilder::new();
        for name in &names {
            builder = builder.define(name);
        }
        let builder = builder.pass("MAIN", &pick(vertex), &pick(fragment));
        let descriptor = ShaderDescriptor::parse("p/s.shd", &builder.build()).unwrap();

        let variants = plan_variants(&descriptor, "p/compiled");
        let count = |stage: ShaderStage| variants.iter().filter(|v| v.stage == stage).count();
        let pass = &descriptor.passes[0];

        prop_assert_eq!(count(ShaderStage::Vertex), 1usize << pass.vertex_mask.bits().count_ones());
        prop_assert_eq!(count(ShaderStage::Fragment), 1usize << pass.fragment_mask.bits().count_ones());
        for variant in &variants {
            prop_assert!(variant.mask.is_subset_of(pass.local_mask(variant.stage)));
        }
        prop_assert!(define_count <= MAX_DEFINES);
    }
}
