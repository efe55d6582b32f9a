use super::super::args::SummarizeArgs;
use crate::exit_codes;
use dxbench_core::report::console::format_file_summaries;
use dxbench_core::report::summarize_dir;

pub(crate) fn run(args: SummarizeArgs) -> anyhow::Result<i32> {
    let rows = match summarize_dir(&args.results_dir) {
        Ok(rows) => rows,
        Err(e) => {
            eprintln!("error: {:#}", e);
            return Ok(exit_codes::CONFIG_ERROR);
        }
    };
    if rows.is_empty() {
        eprintln!("no result files in {}", args.results_dir.display());
        return Ok(exit_codes::CONFIG_ERROR);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        print!("{}", format_file_summaries(&rows));
    }
    Ok(exit_codes::SUCCESS)
}
