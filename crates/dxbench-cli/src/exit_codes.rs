//! Process exit codes. Part of the CLI contract.

use dxbench_core::errors::RunErrorKind;

pub const SUCCESS: i32 = 0;
pub const RUN_FAILED: i32 = 1; // Backend, lookup or write failure during a run
pub const CONFIG_ERROR: i32 = 2; // Bad config, template, dataset or arguments

pub fn for_kind(kind: RunErrorKind) -> i32 {
    if kind.is_input_error() {
        CONFIG_ERROR
    } else {
        RUN_FAILED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_errors_map_to_config_error() {
        assert_eq!(for_kind(RunErrorKind::MissingConfig), CONFIG_ERROR);
        assert_eq!(for_kind(RunErrorKind::Dataset), CONFIG_ERROR);
        assert_eq!(for_kind(RunErrorKind::ProviderRateLimit), RUN_FAILED);
        assert_eq!(for_kind(RunErrorKind::Network), RUN_FAILED);
    }
}
