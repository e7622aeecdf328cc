//! Command dispatch and handlers

use std::io;
use std::time::Instant;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::services::{
    parse_worker_count, Aggregation, CodeReport, FrequencyAggregator, HuffmanService,
};
use crate::cli::args::{Cli, Commands, InputArgs};
use crate::cli::output;
use crate::cli::CliResult;
use crate::config::{global_config_path, Settings};
use crate::domain::{render_symbol, CodeRecord, FrequencyTable, TreeDisplay};
use crate::infrastructure::InputResolver;

pub const CODE_TABLE_HEADER: &str = "SYMBOL\tWEIGHT\tHUFFMAN CODE";
pub const FREQUENCY_HEADER: &str = "SYMBOL\tCOUNT";

/// Execute the parsed command line with settings from the config files and
/// environment, reading missing input from stdin.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    run_command(cli, settings, &InputResolver::real())
}

/// Execute the parsed command line against already loaded settings.
pub fn run_command(cli: &Cli, mut settings: Settings, resolver: &InputResolver) -> CliResult<()> {
    apply_overrides(&mut settings, &cli.input);
    debug!("run_command: settings={:?}", settings);

    match &cli.command {
        None | Some(Commands::Codes) => cmd_codes(&cli.input, &settings, resolver),
        Some(Commands::Freq) => cmd_freq(&cli.input, &settings, resolver),
        Some(Commands::Tree) => cmd_tree(&cli.input, &settings, resolver),
        Some(Commands::Config) => cmd_config(&settings),
        Some(Commands::Completion { shell }) => cmd_completion(*shell),
    }
}

/// Command-line flags override loaded settings.
pub fn apply_overrides(settings: &mut Settings, input: &InputArgs) {
    if input.quiet {
        settings.quiet = true;
    }
    if let Some(strategy) = input.strategy {
        settings.strategy = strategy;
    }
}

/// One `symbol \t frequency \t code` line per record, in record order.
pub fn code_table_lines(records: &[CodeRecord]) -> Vec<String> {
    records.iter().map(CodeRecord::to_string).collect()
}

/// One `symbol \t count` line per non-zero symbol, ascending.
pub fn frequency_lines(table: &FrequencyTable) -> Vec<String> {
    table
        .iter_nonzero()
        .map(|(symbol, count)| format!("{}\t{}", render_symbol(symbol), count))
        .collect()
}

/// Start/end line pairs for each worker, in worker order.
pub fn worker_status_lines(aggregation: &Aggregation) -> Vec<String> {
    aggregation
        .workers
        .iter()
        .flat_map(|stat| {
            let p = &stat.partition;
            [
                format!(
                    "{} start: partition {} [{}, {})",
                    stat.thread, p.worker, p.start, p.end
                ),
                format!(
                    "{} end: {} symbols in {:?}",
                    stat.thread,
                    p.len(),
                    stat.elapsed
                ),
            ]
        })
        .collect()
}

/// Resolve text and worker count, rejecting a bad count before any worker starts.
///
/// A `--tasks` value is checked before anything is read, so a bad flag never
/// waits on a text prompt.
pub fn prepare(
    input: &InputArgs,
    settings: &Settings,
    resolver: &InputResolver,
) -> CliResult<(HuffmanService, Vec<u8>)> {
    let flagged = input.tasks.as_deref().map(parse_worker_count).transpose()?;
    let text = resolver.resolve_text(input.file.as_deref(), input.text.as_deref())?;
    let workers = match flagged {
        Some(workers) => workers,
        None => resolver.resolve_workers(None, settings.workers)?,
    };
    let service = HuffmanService::new(FrequencyAggregator::with_workers(
        workers,
        settings.strategy,
    ));
    debug!(
        "prepare: {} bytes, {} workers, strategy={}",
        text.len(),
        service.aggregator().workers(),
        service.aggregator().strategy()
    );
    Ok((service, text))
}

fn print_worker_status(aggregation: &Aggregation, service: &HuffmanService) {
    for line in worker_status_lines(aggregation) {
        output::status(&line);
    }
    output::success(&format!(
        "Finished all {} workers ({})",
        aggregation.workers.len(),
        service.aggregator().strategy()
    ));
}

fn print_elapsed(started: Instant) {
    output::row(&format!(
        "Total time for tree building: {} milliseconds",
        started.elapsed().as_millis()
    ));
}

fn print_code_table(report: &CodeReport) {
    if report.is_empty() {
        output::warning("no input symbols, code table is empty");
        return;
    }
    output::header(CODE_TABLE_HEADER);
    for line in code_table_lines(&report.records) {
        output::row(&line);
    }
}

#[instrument(skip(resolver))]
fn cmd_codes(input: &InputArgs, settings: &Settings, resolver: &InputResolver) -> CliResult<()> {
    let started = Instant::now();
    let (service, text) = prepare(input, settings, resolver)?;
    let report = service.analyze(&text)?;

    if !settings.quiet {
        print_worker_status(&report.aggregation, &service);
        print_code_table(&report);
    }
    print_elapsed(started);
    Ok(())
}

#[instrument(skip(resolver))]
fn cmd_freq(input: &InputArgs, settings: &Settings, resolver: &InputResolver) -> CliResult<()> {
    let started = Instant::now();
    let (service, text) = prepare(input, settings, resolver)?;
    let aggregation = service.frequencies(&text)?;

    if !settings.quiet {
        print_worker_status(&aggregation, &service);
        output::header(FREQUENCY_HEADER);
        for line in frequency_lines(&aggregation.table) {
            output::row(&line);
        }
    }
    print_elapsed(started);
    Ok(())
}

#[instrument(skip(resolver))]
fn cmd_tree(input: &InputArgs, settings: &Settings, resolver: &InputResolver) -> CliResult<()> {
    let started = Instant::now();
    let (service, text) = prepare(input, settings, resolver)?;
    let report = service.analyze(&text)?;

    if !settings.quiet {
        match &report.tree {
            Some(tree) => {
                output::header(&format!(
                    "Huffman tree: {} leaves, depth {}, {} bits",
                    tree.leaf_count(),
                    tree.depth(),
                    tree.weighted_path_length()
                ));
                output::row(&tree.to_tree_string());
            }
            None => output::warning("no input symbols, tree is empty"),
        }
    }
    print_elapsed(started);
    Ok(())
}

fn cmd_config(settings: &Settings) -> CliResult<()> {
    if let Some(path) = global_config_path() {
        output::header(&format!("# global config: {}", path.display()));
    }
    output::row(&settings.to_toml()?);
    Ok(())
}

fn cmd_completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    eprintln!("Generating completion file for {shell:?}...");
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::application::services::AggregationStrategy;
    use crate::domain::{FrequencyTable, HuffmanTree};
    use crate::exitcode;
    use crate::infrastructure::traits::{Prompt, RealFileSystem};

    /// Fails any question, so a test notices an unexpected stdin read.
    struct ClosedStdin;

    impl Prompt for ClosedStdin {
        fn ask(&self, message: &str) -> io::Result<String> {
            Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("unexpected prompt: {message}"),
            ))
        }
    }

    fn resolver() -> InputResolver {
        InputResolver::new(Arc::new(RealFileSystem), Arc::new(ClosedStdin))
    }

    #[test]
    fn test_bad_tasks_flag_fails_before_text_prompt() {
        let input = InputArgs {
            tasks: Some("0".into()),
            ..InputArgs::default()
        };
        let code = prepare(&input, &Settings::default(), &resolver())
            .err()
            .map(|e| e.exit_code());
        assert_eq!(code, Some(exitcode::USAGE));
    }

    #[test]
    fn test_configured_workers_used_without_flag() {
        let input = InputArgs {
            text: Some("abcabc".into()),
            ..InputArgs::default()
        };
        let settings = Settings {
            workers: Some(2),
            strategy: AggregationStrategy::Mutex,
            ..Settings::default()
        };
        let (service, text) = prepare(&input, &settings, &resolver()).unwrap();
        assert_eq!(service.aggregator().workers().get(), 2);
        assert_eq!(service.aggregator().strategy(), AggregationStrategy::Mutex);
        assert_eq!(text, b"abcabc");
    }

    #[test]
    fn test_tasks_flag_wins_over_configured_workers() {
        let input = InputArgs {
            text: Some("abc".into()),
            tasks: Some("5".into()),
            ..InputArgs::default()
        };
        let settings = Settings {
            workers: Some(2),
            ..Settings::default()
        };
        let (service, _) = prepare(&input, &settings, &resolver()).unwrap();
        assert_eq!(service.aggregator().workers().get(), 5);
    }

    #[test]
    fn test_apply_overrides() {
        let mut settings = Settings::default();
        let input = InputArgs {
            quiet: true,
            strategy: Some(AggregationStrategy::Atomic),
            ..InputArgs::default()
        };
        apply_overrides(&mut settings, &input);
        assert!(settings.quiet);
        assert_eq!(settings.strategy, AggregationStrategy::Atomic);
    }

    #[test]
    fn test_quiet_flag_does_not_unset_config_quiet() {
        let mut settings = Settings {
            quiet: true,
            ..Settings::default()
        };
        apply_overrides(&mut settings, &InputArgs::default());
        assert!(settings.quiet);
    }

    #[test]
    fn test_code_table_lines_are_tab_separated() {
        let tree = HuffmanTree::build(&FrequencyTable::from_text(b"abbcccc")).unwrap();
        let lines = code_table_lines(&tree.code_records());
        assert_eq!(lines, vec!["a\t1\t00", "b\t2\t01", "c\t4\t1"]);
    }

    #[test]
    fn test_frequency_lines_escape_newline() {
        let lines = frequency_lines(&FrequencyTable::from_text(b"a\na\n"));
        assert_eq!(lines, vec!["\\n\t2", "a\t2"]);
    }

    #[test]
    fn test_worker_status_lines_pair_per_worker() {
        let aggregator = FrequencyAggregator::new(2, AggregationStrategy::Merge).unwrap();
        let aggregation = aggregator.aggregate(b"abcde").unwrap();
        let lines = worker_status_lines(&aggregation);
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("start: partition 1 [0, 2)"));
        assert!(lines[3].contains("end: 3 symbols"));
    }
}
