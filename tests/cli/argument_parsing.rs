//! CLI argument parsing tests

use gitmeta::app::cli::args::{early_color_choice, Args};
use gitmeta::scanner::StatusFilter;
use std::path::PathBuf;

fn parse(args: &[&str]) -> Result<Args, clap::Error> {
    let argv = std::iter::once("gitmeta").chain(args.iter().copied());
    Args::try_parse_styled(argv, false)
}

#[test]
fn test_default_filter_is_not_ok() {
    let args = parse(&[]).unwrap();
    assert_eq!(args.filter(), StatusFilter::NotOk);
    assert!(!args.discover);
    assert!(!args.clean);
    assert!(!args.terminal);
}

#[test]
fn test_filter_flags() {
    let cases = [
        ("-a", StatusFilter::All),
        ("--all", StatusFilter::All),
        ("-o", StatusFilter::Ok),
        ("-n", StatusFilter::NotOk),
        ("-k", StatusFilter::Ko),
        ("-r", StatusFilter::Remote),
        ("--no-remote", StatusFilter::NoRemote),
        ("-u", StatusFilter::Unknown),
    ];
    for (flag, expected) in cases {
        assert_eq!(parse(&[flag]).unwrap().filter(), expected, "flag {}", flag);
    }
}

#[test]
fn test_filters_are_mutually_exclusive() {
    assert!(parse(&["--all", "--ok"]).is_err());
    assert!(parse(&["-k", "--no-remote"]).is_err());
}

#[test]
fn test_actions_combine_with_filters() {
    let args = parse(&["-d", "-c", "-t", "-r", "--scan-root", "/src"]).unwrap();
    assert!(args.discover);
    assert!(args.clean);
    assert!(args.terminal);
    assert_eq!(args.filter(), StatusFilter::Remote);
    assert_eq!(args.scan_root, Some(PathBuf::from("/src")));
}

#[test]
fn test_verbosity_counts() {
    assert_eq!(parse(&["-vv"]).unwrap().verbosity(), 2);
    assert_eq!(parse(&["-v", "-qqq"]).unwrap().verbosity(), -2);
}

#[test]
fn test_logging_flags() {
    let args = parse(&[
        "--log-level",
        "debug",
        "--log-format",
        "json",
        "--log-file",
        "none",
    ])
    .unwrap();
    assert_eq!(args.log_level.as_deref(), Some("debug"));
    assert_eq!(args.log_format.as_deref(), Some("json"));
    assert!(args.log_file_path().is_none());

    assert!(parse(&["--log-level", "loud"]).is_err());
    assert!(parse(&["--log-format", "xml"]).is_err());
}

#[test]
fn test_color_flags() {
    assert_eq!(parse(&["--color"]).unwrap().color_choice(), Some(true));
    assert_eq!(parse(&["--no-color"]).unwrap().color_choice(), Some(false));
    assert_eq!(parse(&[]).unwrap().color_choice(), None);
    assert!(parse(&["--color", "--no-color"]).is_err());

    assert!(early_color_choice(["gitmeta", "--color"]));
    assert!(!early_color_choice(["gitmeta", "--no-color"]));
}

#[test]
fn test_version_and_help_are_reported_as_errors_to_print() {
    let version = parse(&["--version"]).unwrap_err();
    assert_eq!(version.kind(), clap::error::ErrorKind::DisplayVersion);
    assert!(!version.use_stderr());

    let help = parse(&["--help"]).unwrap_err();
    assert_eq!(help.kind(), clap::error::ErrorKind::DisplayHelp);
}
