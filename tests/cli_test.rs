//! Tests for argument parsing, source resolution and exit codes

use std::path::PathBuf;

use clap::Parser;
use rstest::rstest;

use tree2json::application::{ApplicationError, Source};
use tree2json::cli::args::{ConfigCommands, DuplicateArg};
use tree2json::cli::{Cli, CliError, Commands};
use tree2json::domain::{DomainError, DuplicatePolicy};
use tree2json::exitcode;

// ============================================================
// Source resolution
// ============================================================

#[rstest]
#[case("-", Source::Stdin)]
#[case("tree.txt", Source::File(PathBuf::from("tree.txt")))]
#[case("  listing/out.txt ", Source::File(PathBuf::from("listing/out.txt")))]
fn given_argument_when_resolving_source_then_classifies_it(
    #[case] arg: &str,
    #[case] expected: Source,
) {
    assert_eq!(Source::from_arg(arg).unwrap(), expected);
}

#[rstest]
#[case("http://example.com/tree.txt")]
#[case("https://example.com/a/b.txt?raw=1")]
#[case("HTTPS://example.com/upper.txt")]
fn given_http_argument_when_resolving_source_then_returns_url(#[case] arg: &str) {
    assert!(matches!(Source::from_arg(arg).unwrap(), Source::Url(_)));
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("https://")]
fn given_unusable_argument_when_resolving_source_then_returns_invalid_source(#[case] arg: &str) {
    assert!(matches!(
        Source::from_arg(arg),
        Err(ApplicationError::InvalidSource(_))
    ));
}

#[test]
fn given_env_var_in_path_when_resolving_source_then_expands_it() {
    std::env::set_var("TREE2JSON_CLI_TEST_DIR", "/data/listings");

    let source = Source::from_arg("$TREE2JSON_CLI_TEST_DIR/tree.txt").unwrap();

    assert_eq!(
        source,
        Source::File(PathBuf::from("/data/listings/tree.txt"))
    );
}

// ============================================================
// Argument parsing
// ============================================================

#[test]
fn given_convert_with_flags_when_parsing_then_fields_are_set() {
    let cli = Cli::try_parse_from([
        "tree2json",
        "convert",
        "tree.txt",
        "-e",
        "cp950",
        "--no-normalize",
        "--duplicates",
        "reject",
        "--compact",
        "-o",
        "out.json",
        "--error-json",
    ])
    .unwrap();

    match cli.command {
        Some(Commands::Convert {
            input,
            compact,
            output,
            error_json,
        }) => {
            assert_eq!(input.source.as_deref(), Some("tree.txt"));
            assert_eq!(input.encoding.as_deref(), Some("cp950"));
            assert!(input.no_normalize);
            assert_eq!(input.duplicates, Some(DuplicateArg::Reject));
            assert!(compact);
            assert_eq!(output, Some(PathBuf::from("out.json")));
            assert!(error_json);
        }
        other => panic!("expected convert, got {other:?}"),
    }
}

#[test]
fn given_convert_without_source_when_parsing_then_source_is_none() {
    let cli = Cli::try_parse_from(["tree2json", "convert"]).unwrap();

    assert!(matches!(
        cli.command,
        Some(Commands::Convert { input, .. }) if input.source.is_none()
    ));
}

#[test]
fn given_global_flags_after_subcommand_when_parsing_then_are_accepted() {
    let cli = Cli::try_parse_from(["tree2json", "render", "-", "-C", "/tmp/project", "-v"]).unwrap();

    assert_eq!(cli.project_dir, Some(PathBuf::from("/tmp/project")));
    assert_eq!(cli.verbose, 1);
    assert!(matches!(cli.command, Some(Commands::Render { .. })));
}

#[test]
fn given_config_init_global_when_parsing_then_sets_flag() {
    let cli = Cli::try_parse_from(["tree2json", "config", "init", "--global"]).unwrap();

    assert!(matches!(
        cli.command,
        Some(Commands::Config {
            command: ConfigCommands::Init { global: true }
        })
    ));
}

#[test]
fn given_unknown_duplicate_policy_when_parsing_then_fails() {
    let result = Cli::try_parse_from(["tree2json", "convert", "--duplicates", "sometimes"]);

    assert!(result.is_err());
}

#[rstest]
#[case(DuplicateArg::Overwrite, DuplicatePolicy::Overwrite)]
#[case(DuplicateArg::Merge, DuplicatePolicy::Merge)]
#[case(DuplicateArg::Reject, DuplicatePolicy::Reject)]
fn given_duplicate_arg_when_converting_then_maps_to_policy(
    #[case] arg: DuplicateArg,
    #[case] expected: DuplicatePolicy,
) {
    assert_eq!(DuplicatePolicy::from(arg), expected);
}

// ============================================================
// Exit codes
// ============================================================

fn app(e: ApplicationError) -> CliError {
    CliError::from(e)
}

#[test]
fn given_errors_when_mapping_exit_codes_then_follow_sysexits() {
    assert_eq!(CliError::Usage("no source".into()).exit_code(), exitcode::USAGE);
    assert_eq!(
        app(ApplicationError::Fetch {
            url: "https://example.com".into(),
            message: "HTTP 500".into()
        })
        .exit_code(),
        exitcode::UNAVAILABLE
    );
    assert_eq!(
        app(ApplicationError::InvalidSource("".into())).exit_code(),
        exitcode::NOINPUT
    );
    assert_eq!(
        app(ApplicationError::UnknownEncoding("klingon".into())).exit_code(),
        exitcode::USAGE
    );
    assert_eq!(
        app(ApplicationError::Config {
            message: "bad".into()
        })
        .exit_code(),
        exitcode::CONFIG
    );
    assert_eq!(
        app(ApplicationError::Domain(DomainError::DuplicateEntry {
            name: "a".into(),
            line: 2
        }))
        .exit_code(),
        exitcode::DATAERR
    );
    assert_eq!(
        app(ApplicationError::OperationFailed {
            context: "write output".into(),
            source: Box::new(std::io::Error::other("disk full")),
        })
        .exit_code(),
        exitcode::IOERR
    );
}

#[test]
fn given_domain_error_when_displayed_then_message_names_entry_and_line() {
    let err = app(ApplicationError::Domain(DomainError::DuplicateEntry {
        name: "src".into(),
        line: 4,
    }));

    let message = err.to_string();

    assert!(message.contains("src"), "message was: {message}");
    assert!(message.contains('4'), "message was: {message}");
}
