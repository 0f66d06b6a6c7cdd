use clap::Parser;

use act::{ActError, Cli, Output};

fn main() {
    let cli = Cli::parse();
    let output = Output::new(cli.verbose > 0, cli.quiet);

    if let Err(e) = cli.run() {
        output.critical(&format!("{e:#}"));
        // a failed step's status is passed through untouched
        let code = e.downcast_ref::<ActError>().map_or(1, ActError::exit_code);
        std::process::exit(code);
    }
}
