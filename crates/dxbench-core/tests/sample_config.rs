//! The sample config, prompts and dataset at the repository root stay loadable.

use std::path::PathBuf;

use dxbench_core::config::{load_config, load_dataset, DescriptionPolicy, Variant};
use dxbench_core::prompt::{PromptBuilder, PromptTemplate};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..")
}

#[test]
fn sample_eval_yaml_loads() {
    let cfg = load_config(&repo_root().join("eval.yaml")).expect("eval.yaml");
    assert_eq!(cfg.ks, vec![4, 9, 49, 99, 499]);
    assert_eq!(cfg.seed, Some(42));
    assert!(cfg.dataset.ends_with("data/evaluation_data.json"));
    assert!(cfg.dataset.exists());
}

#[test]
fn both_prompt_variants_render_the_sample_cases() {
    let cases = load_dataset(&repo_root().join("data/evaluation_data.json")).unwrap();
    assert_eq!(cases.len(), 3);

    for (file, variant) in [
        ("prompts/zeroshot.yml", Variant::Zeroshot),
        ("prompts/zeroshot_w_description.yml", Variant::ZeroshotWithDescription),
    ] {
        let template = PromptTemplate::load(&repo_root().join(file)).unwrap();
        let builder = PromptBuilder::new(&template, variant, DescriptionPolicy::Strict);
        let mut rng = StdRng::seed_from_u64(42);
        for (i, case) in cases.iter().enumerate() {
            let inst = builder.build(i, case, 4, &mut rng).unwrap();
            assert!(inst.prompt.contains(&case.case_prompt));
            assert!(inst.prompt.contains("\"final_diagnosis\""));
            assert!(!inst.prompt.contains("{current_choices}"));
            if variant == Variant::ZeroshotWithDescription {
                assert!(inst.prompt.contains("(Description: "));
            }
        }
    }
}
