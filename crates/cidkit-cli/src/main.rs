//! cidkit: content identifier and secret export CLI
//!
//! Commands:
//!   generate [FILE]           - CID of a file (or stdin)
//!   inspect <CID>             - decode length/payload and report validity
//!   extract <CID>             - print the content embedded in a literal CID
//!   split-path <PATH>         - split a URL path into CID + extension
//!   scan [FILE]               - list CID references in text
//!   secret encrypt|decrypt    - passphrase-protect a secret value
//!   config show               - display current configuration

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use secrecy::SecretString;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use cidkit_cid::{
    find_cid_candidates, find_cid_references, is_normalized_cid, parse, split_cid_path, Cid,
};
use cidkit_core::config::CidkitConfig;
use cidkit_crypto::SecretCipher;

// ── CLI structure ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "cidkit",
    version,
    about = "Content identifier toolkit",
    long_about = "cidkit: generate, inspect, and scan content identifiers; encrypt secrets for export"
)]
struct Cli {
    /// Path to cidkit.toml configuration file
    #[arg(long, short = 'c', env = "CIDKIT_CONFIG", default_value = "cidkit.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long, env = "CIDKIT_LOG")]
    log: Option<String>,

    /// Log format; overrides the config file
    #[arg(long, env = "CIDKIT_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the CID of a file, or of stdin when no file is given
    Generate {
        file: Option<PathBuf>,
        /// Also print a `/<cid>.<ext>` link path
        #[arg(long)]
        ext: Option<String>,
    },

    /// Decode a CID and report its length, kind, and validity
    Inspect { cid: String },

    /// Write the content embedded in a literal CID to stdout
    Extract { cid: String },

    /// Split `/<cid>[.ext][?query][#fragment]` into its parts
    #[command(name = "split-path")]
    SplitPath { path: String },

    /// List CID references found in a text file (or stdin)
    Scan {
        file: Option<PathBuf>,
        /// Report CID-shaped tokens without full validation
        #[arg(long)]
        shape_only: bool,
    },

    /// Secret value encryption
    Secret {
        #[command(subcommand)]
        action: SecretAction,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum SecretAction {
    /// Encrypt a value (read from stdin when omitted)
    Encrypt { value: Option<String> },
    /// Decrypt a token (read from stdin when omitted)
    Decrypt { token: Option<String> },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the active configuration (merged defaults + config file)
    Show,
}

#[derive(Clone, Debug, ValueEnum)]
enum LogFormat {
    Json,
    Text,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    let loaded = CidkitConfig::load(&cli.config)
        .with_context(|| format!("loading config: {}", cli.config.display()))?;
    let config_found = loaded.is_some();
    let config = loaded.unwrap_or_default();

    let level = cli.log.clone().unwrap_or_else(|| config.log.level.clone());
    let format = cli.log_format.clone().unwrap_or(match config.log.format.as_str() {
        "json" => LogFormat::Json,
        _ => LogFormat::Text,
    });
    init_logging(&level, &format);

    if !config_found {
        debug!(config = %cli.config.display(), "config file not found (using defaults)");
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Generate { file, ext } => cmd_generate(&mut out, file.as_deref(), ext.as_deref()),
        Commands::Inspect { cid } => cmd_inspect(&mut out, &cid),
        Commands::Extract { cid } => cmd_extract(&mut out, &cid),
        Commands::SplitPath { path } => cmd_split_path(&mut out, &path),
        Commands::Scan { file, shape_only } => {
            let text = read_text_input(file.as_deref())?;
            cmd_scan(&mut out, &text, config.scan.verify && !shape_only)
        }
        Commands::Secret { action } => {
            let passphrase = resolve_passphrase(&config)?;
            let cipher = SecretCipher::new(&passphrase).context("preparing secret cipher")?;
            match action {
                SecretAction::Encrypt { value } => {
                    let value = value.map_or_else(|| read_text_input(None), Ok)?;
                    cmd_secret_encrypt(&mut out, &cipher, value.trim_end_matches('\n'))
                }
                SecretAction::Decrypt { token } => {
                    let token = token.map_or_else(|| read_text_input(None), Ok)?;
                    cmd_secret_decrypt(&mut out, &cipher, token.trim())
                }
            }
        }
        Commands::Config { action: ConfigAction::Show } => {
            cmd_config_show(&mut out, &config, &cli.config, config_found)
        }
    }
}

fn init_logging(level: &str, format: &LogFormat) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // stdout carries command output; logs go to stderr
    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

// ── Input helpers ─────────────────────────────────────────────────────────────

fn read_text_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("reading stdin")?;
            Ok(text)
        }
    }
}

/// Passphrase from the configured environment variable, else an interactive prompt.
fn resolve_passphrase(config: &CidkitConfig) -> Result<SecretString> {
    let var = &config.secrets.passphrase_env;
    if let Ok(value) = std::env::var(var) {
        debug!(env = %var, "using passphrase from environment");
        return Ok(SecretString::from(value));
    }
    if !config.secrets.prompt {
        anyhow::bail!("passphrase not set; export {var} or enable secrets.prompt in config");
    }
    let value = rpassword::prompt_password("Passphrase: ").context("reading passphrase")?;
    Ok(SecretString::from(value))
}

// ── `cidkit generate` ─────────────────────────────────────────────────────────

fn cmd_generate(out: &mut impl Write, file: Option<&Path>, ext: Option<&str>) -> Result<()> {
    let cid = match file {
        Some(path) => {
            let reader = std::fs::File::open(path)
                .with_context(|| format!("opening {}", path.display()))?;
            Cid::from_reader(std::io::BufReader::new(reader))
                .with_context(|| format!("generating CID for {}", path.display()))?
        }
        None => Cid::from_reader(std::io::stdin().lock()).context("generating CID for stdin")?,
    };

    info!(
        cid = %cid,
        bytes = cid.content_length(),
        literal = cid.is_literal(),
        "generated CID"
    );

    writeln!(out, "{cid}")?;
    if let Some(ext) = ext {
        writeln!(out, "{}", cid.to_path(Some(ext)))?;
    }
    Ok(())
}

// ── `cidkit inspect` ──────────────────────────────────────────────────────────

fn cmd_inspect(out: &mut impl Write, raw: &str) -> Result<()> {
    let parts = parse(raw).with_context(|| format!("parsing CID {raw:?}"))?;
    let bare = split_cid_path(raw).map(|p| p.cid);
    let normalized = bare.as_deref().is_some_and(is_normalized_cid);

    writeln!(out, "length:     {} ({})", parts.content_length, fmt_bytes(parts.content_length))?;
    writeln!(out, "kind:       {}", if parts.is_literal() { "literal" } else { "hashed" })?;
    writeln!(out, "payload:    {} bytes", parts.payload.len())?;
    writeln!(out, "normalized: {}", if normalized { "yes" } else { "no" })?;
    if let Some(mime) = split_cid_path(raw).and_then(|p| p.mime_type()) {
        writeln!(out, "mime:       {mime}")?;
    }
    if !normalized {
        warn!(cid = raw, "CID decodes but is not in normalized form");
    }
    Ok(())
}

// ── `cidkit extract` ──────────────────────────────────────────────────────────

fn cmd_extract(out: &mut impl Write, raw: &str) -> Result<()> {
    let cid = Cid::parse(raw).with_context(|| format!("parsing CID {raw:?}"))?;
    let content = cid.literal_content().with_context(|| {
        format!(
            "{cid} is a hashed CID ({}); its content lives in the content store",
            fmt_bytes(cid.content_length())
        )
    })?;
    out.write_all(&content)?;
    Ok(())
}

// ── `cidkit split-path` ───────────────────────────────────────────────────────

fn cmd_split_path(out: &mut impl Write, path: &str) -> Result<()> {
    let split = split_cid_path(path).with_context(|| format!("no CID in path {path:?}"))?;
    writeln!(out, "cid:       {}", split.cid)?;
    writeln!(out, "extension: {}", split.extension.as_deref().unwrap_or("-"))?;
    writeln!(out, "mime:      {}", split.mime_type().unwrap_or("-"))?;
    Ok(())
}

// ── `cidkit scan` ─────────────────────────────────────────────────────────────

fn cmd_scan(out: &mut impl Write, text: &str, verify: bool) -> Result<()> {
    let refs = if verify {
        find_cid_references(text)
    } else {
        find_cid_candidates(text)
    };
    info!(references = refs.len(), verify, "scan complete");

    for r in refs {
        match r.extension {
            Some(ext) => writeln!(out, "{}..{}\t{}\t{ext}", r.range.start, r.range.end, r.cid)?,
            None => writeln!(out, "{}..{}\t{}", r.range.start, r.range.end, r.cid)?,
        }
    }
    Ok(())
}

// ── `cidkit secret` ───────────────────────────────────────────────────────────

fn cmd_secret_encrypt(out: &mut impl Write, cipher: &SecretCipher, value: &str) -> Result<()> {
    let token = cipher.encrypt(value).context("encrypting secret")?;
    debug!(bytes = value.len(), "secret encrypted");
    writeln!(out, "{token}")?;
    Ok(())
}

fn cmd_secret_decrypt(out: &mut impl Write, cipher: &SecretCipher, token: &str) -> Result<()> {
    let value = cipher.decrypt(token).context("decrypting secret")?;
    writeln!(out, "{value}")?;
    Ok(())
}

// ── `cidkit config show` ──────────────────────────────────────────────────────

fn cmd_config_show(
    out: &mut impl Write,
    config: &CidkitConfig,
    config_path: &Path,
    found: bool,
) -> Result<()> {
    if found {
        writeln!(out, "# Configuration from: {}", config_path.display())?;
    } else {
        writeln!(out, "# Configuration: defaults (no file at {})", config_path.display())?;
    }
    writeln!(out)?;
    let rendered = config
        .to_toml_string()
        .context("serializing config to TOML")?;
    write!(out, "{rendered}")?;
    Ok(())
}

// ── Utilities ─────────────────────────────────────────────────────────────────

fn fmt_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn generate_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"abcd").unwrap();

        let output = run(|out| cmd_generate(out, Some(file.path()), Some("txt")));
        assert_eq!(output, "AAAAAAAEYWJjZA\n/AAAAAAAEYWJjZA.txt\n");
    }

    #[test]
    fn generate_missing_file_fails() {
        let mut out = Vec::new();
        let err = cmd_generate(&mut out, Some(Path::new("/nonexistent/cidkit")), None);
        assert!(err.is_err());
    }

    #[test]
    fn inspect_literal_and_hashed() {
        let output = run(|out| cmd_inspect(out, "/AAAAAAAEYWJjZA.txt"));
        assert!(output.contains("length:     4"));
        assert!(output.contains("kind:       literal"));
        assert!(output.contains("normalized: yes"));
        assert!(output.contains("mime:       text/plain"));

        let hashed = Cid::from_content(&[0u8; 2048]).unwrap();
        let output = run(|out| cmd_inspect(out, hashed.as_str()));
        assert!(output.contains("kind:       hashed"));
        assert!(output.contains("payload:    64 bytes"));
        assert!(output.contains("2.0 KB"));
    }

    #[test]
    fn inspect_flags_inconsistent_cid() {
        let output = run(|out| cmd_inspect(out, "AAAAAAAEYWJj"));
        assert!(output.contains("normalized: no"));
    }

    #[test]
    fn extract_literal_only() {
        let output = run(|out| cmd_extract(out, "AAAAAAAEYWJjZA"));
        assert_eq!(output, "abcd");

        let hashed = Cid::from_content(&[1u8; 100]).unwrap();
        let mut out = Vec::new();
        assert!(cmd_extract(&mut out, hashed.as_str()).is_err());
    }

    #[test]
    fn split_path_output() {
        let output = run(|out| cmd_split_path(out, "/AAAAAAAA.json?x=1"));
        assert!(output.contains("cid:       AAAAAAAA"));
        assert!(output.contains("extension: json"));
        assert!(output.contains("mime:      application/json"));

        let mut out = Vec::new();
        assert!(cmd_split_path(&mut out, "/a/b").is_err());
    }

    #[test]
    fn scan_lists_references() {
        let text = "see /AAAAAAAEYWJjZA.txt and AAAAAAAEYWJj";
        let verified = run(|out| cmd_scan(out, text, true));
        assert_eq!(verified, "4..23\tAAAAAAAEYWJjZA\ttxt\n");

        let shapes = run(|out| cmd_scan(out, text, false));
        assert_eq!(shapes.lines().count(), 2);
    }

    #[test]
    fn secret_roundtrip_through_commands() {
        let cipher = SecretCipher::from_passphrase("cli test").unwrap();
        let token = run(|out| cmd_secret_encrypt(out, &cipher, "db-password"));
        let value = run(|out| cmd_secret_decrypt(out, &cipher, token.trim()));
        assert_eq!(value, "db-password\n");
    }

    #[test]
    fn config_show_renders_toml() {
        let config = CidkitConfig::default();
        let output = run(|out| cmd_config_show(out, &config, Path::new("cidkit.toml"), false));
        assert!(output.starts_with("# Configuration: defaults"));
        assert!(output.contains("[log]"));
        assert!(output.contains("passphrase_env = \"CIDKIT_PASSPHRASE\""));
    }

    #[test]
    fn fmt_bytes_units() {
        assert_eq!(fmt_bytes(10), "10 B");
        assert_eq!(fmt_bytes(2048), "2.0 KB");
        assert_eq!(fmt_bytes(3 * 1024 * 1024), "3.0 MB");
    }
}
