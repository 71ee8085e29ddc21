mod entry;
mod logger;

use llmperf_report::error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
