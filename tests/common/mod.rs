use std::path::Path;

use assert_cmd::Command;

/// The binary with a scrubbed environment: no API key, no stray log filter,
/// and `workdir` as the working directory so no local `.env` or
/// `config.toml` is picked up.
pub fn daily365_bin(workdir: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("daily365").expect("daily365 test binary should build");
    cmd.current_dir(workdir)
        .env_remove("API_KEY")
        .env_remove("GEMINI_API_KEY")
        .env_remove("RUST_LOG");
    cmd
}
