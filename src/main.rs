use anyhow::Result;
use bamurai::cli::{self, Commands};
use bamurai::commands;
use bamurai::config::Config;
use bamurai::fragment::SplitMode;
use bamurai::samples::ColumnOverrides;
use clap::Parser;

fn run(args: cli::Args, config: &Config) -> Result<()> {
    match args.command {
        Commands::Split {
            reads,
            len_target,
            output,
        } => {
            let mode = SplitMode::target_length(len_target)?;
            commands::split::run(&reads, mode, output.as_deref(), config)?;
        }
        Commands::Divide {
            reads,
            num_fragments,
            min_length,
            output,
        } => {
            let mode = SplitMode::divide(num_fragments, min_length)?;
            commands::split::run(&reads, mode, output.as_deref(), config)?;
        }
        Commands::Stats { reads, format } => {
            commands::stats::run(&reads, format, config)?;
        }
        Commands::AssignSamples {
            bam,
            table,
            output,
            barcode_column,
            donor_id_column,
        } => {
            let columns = ColumnOverrides {
                barcode: barcode_column,
                donor_id: donor_id_column,
            };
            commands::assign_samples::run(&bam, &table, &output, &columns, config)?;
        }
        Commands::ExtractSample {
            bam,
            table,
            donor_id,
            output,
        } => {
            commands::extract_sample::run(&bam, &table, &donor_id, &output, config)?;
        }
        Commands::SplitSamples {
            bam,
            table,
            output_dir,
        } => {
            commands::split_samples::run(&bam, &table, &output_dir, config)?;
        }
        Commands::Validate { reads } => {
            commands::validate::run(&reads, config)?;
        }
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = cli::Args::parse();
    let config = Config::load();

    if let Err(e) = run(args, &config) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
