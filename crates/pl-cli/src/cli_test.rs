use super::*;
use clap::CommandFactory;

#[test]
fn verify_cli_args() {
    // Validates the entire command tree: short flag conflicts,
    // duplicate args, and other clap definition errors.
    Cli::command().debug_assert();
}

#[test]
fn test_parse_locations_and_flags() {
    let cli = Cli::try_parse_from([
        "playlake",
        "data/in",
        "data/out",
        "-v",
        "--config",
        "playlake.yml",
    ])
    .unwrap();
    assert_eq!(cli.input, "data/in");
    assert_eq!(cli.output, "data/out");
    assert!(cli.verbose);
    assert_eq!(cli.config.as_deref(), Some("playlake.yml"));
    assert_eq!(cli.database, ":memory:");
}

#[test]
fn test_rejects_extra_positional() {
    assert!(Cli::try_parse_from(["playlake", "a", "b", "c"]).is_err());
}
