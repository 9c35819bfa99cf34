use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, error::ErrorKind};

use prhandler::{
    Args, Config,
    error::{PrHandlerError, UsageError},
    logging::init_logging,
    output::render,
    pr_url::parse_pr_url,
    submitter::VoteSubmitter,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    Config::load_dotenv();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let message = e.to_string();
            let message = message.trim_start_matches("error: ").trim_end();
            let err = PrHandlerError::from(UsageError::InvalidArguments(message.to_string()));
            return report(&err.into());
        }
    };

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(&e),
    }
}

async fn run(args: Args) -> Result<()> {
    // Checked before the token so a bad invocation never reads it
    let action = args.action().map_err(PrHandlerError::from)?;
    let config = Config::resolve(&args)?;
    let _log_guard = init_logging(&config.log_config());

    tracing::debug!(
        pat_source = config.pat.source_name(),
        output = %config.output,
        "configuration resolved"
    );

    let reference = parse_pr_url(&args.pr_url).map_err(PrHandlerError::from)?;
    let submitter = VoteSubmitter::new(config.pat.value().clone()).map_err(PrHandlerError::from)?;
    let record = submitter.submit(reference.clone(), action).await?;

    println!("{}", render(&record, &reference, *config.output)?);
    Ok(())
}

fn report(error: &anyhow::Error) -> ExitCode {
    eprintln!("Error: {error}");

    match error.downcast_ref::<PrHandlerError>() {
        Some(err) => {
            if let Some(hint) = err.hint() {
                eprintln!("{hint}");
            }
            err.exit_code().into()
        }
        None => ExitCode::FAILURE,
    }
}
