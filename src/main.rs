use clap::Parser;
use form_serialize::cli::commands::{cmd_collect, cmd_merge};
use form_serialize::cli::config::{Cli, Commands, build_merge_options, build_tracer, load_config};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref());

    // Trace destination: CLI > config > disabled
    let tracer = build_tracer(cli.trace.as_deref(), &config.trace, cli.verbose);

    match cli.command {
        Commands::Collect {
            elements,
            form,
            base,
            output,
        } => {
            let options = build_merge_options(false, None, &config.merge)?;
            cmd_collect(
                &elements,
                form.as_deref(),
                base.as_deref(),
                output.as_deref(),
                options,
                tracer,
                cli.verbose,
            )?;
        }
        Commands::Merge {
            files,
            clone,
            array_merge,
            output,
        } => {
            let options = build_merge_options(clone, array_merge.as_deref(), &config.merge)?;
            cmd_merge(&files, output.as_deref(), options, cli.verbose)?;
        }
    }

    Ok(())
}
