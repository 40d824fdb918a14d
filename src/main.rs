use anyhow::Result;
use jex::Evaluator;
use jex::cli::{self, CliAction};
use jex::command::{ExitCode, Invocation};
use jex::config::ToolConfig;

fn run() -> Result<ExitCode> {
    let mut argv = std::env::args();
    let command_name = cli::command_name(argv.next().as_deref());
    let args: Vec<String> = argv.collect();

    let args = match cli::parse(&command_name, &args)? {
        CliAction::Help => {
            cli::print_usage(&mut std::io::stdout(), &command_name)?;
            return Ok(0);
        }
        CliAction::Evaluate(args) => args,
    };

    let invocation =
        Invocation::for_expression(&ToolConfig::default(), &args.expression, &args.extra);
    Evaluator::system()?.run(&invocation, &mut std::io::stdout(), &mut std::io::stderr())
}

fn main() {
    jex::logging::init();

    let code = match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("jex: {:#}", e);
            1
        }
    };
    std::process::exit(code);
}
