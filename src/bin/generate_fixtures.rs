use std::path::Path;
use std::process::ExitCode;

use verillm_mock::{generate_fixtures, DEFAULT_OUTPUT_DIR};

fn main() -> ExitCode {
    match generate_fixtures(Path::new(DEFAULT_OUTPUT_DIR)) {
        Ok(written) => {
            for path in &written {
                println!("wrote {}", path.display());
            }
            println!("mock dashboard data generated in ./{}/", DEFAULT_OUTPUT_DIR);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("fixture generation failed: {}", err);
            ExitCode::FAILURE
        }
    }
}
