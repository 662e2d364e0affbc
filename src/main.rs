use clap::Parser;
use grade_table::cli::Cli;

fn main() {
    let cli = Cli::parse();
    let pause = cli.pause;
    let outcome = grade_table::run(cli);
    if let Err(err) = &outcome {
        eprintln!("error: {err:#}");
    }
    if pause {
        grade_table::wait_for_enter();
    }
    if let Err(err) = outcome {
        std::process::exit(grade_table::exit_code(&err));
    }
}
