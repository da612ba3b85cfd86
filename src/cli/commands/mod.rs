use clap::{
    Arg, ArgAction, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};

/// Pure clap command definitions with zero business logic
///
/// Required settings are not marked `required` here so that dispatch can
/// report the missing environment variable by name.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new(env!("CARGO_PKG_NAME"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("domain")
                .env("DOMAIN_NAME")
                .help("Domain whose TLS certificate is checked")
                .long("domain")
                .short('d')
                .value_name("DOMAIN"),
        )
        .arg(
            Arg::new("topic-arn")
                .env("SNS_TOPIC_ARN")
                .help("SNS topic that receives the expiration notice")
                .long("topic-arn")
                .short('t')
                .value_name("ARN"),
        )
        .arg(
            Arg::new("days-buffer")
                .env("DAYS_BUFFER")
                .help("Notify when this many days or fewer are left")
                .long("days-buffer")
                .short('b')
                .allow_negative_numbers(true)
                .value_name("DAYS"),
        )
        .arg(
            Arg::new("port")
                .default_value("443")
                .env("CERTPULSE_PORT")
                .help("TLS port to connect to")
                .long("port")
                .short('p')
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("tls-mode")
                .default_value("require")
                .env("CERTPULSE_TLS_MODE")
                .help("TLS mode: require, verify-full")
                .long("tls-mode")
                .long_help(
                    "TLS connection mode used to read the certificate:\n\n\
                    - require: complete the handshake without verifying the peer (default)\n\
                    - verify-full: verify the certificate chain and hostname\n\n\
                    With verify-full an expired or untrusted certificate fails the check\n\
                    instead of being reported."
                )
                .value_name("MODE")
                .value_parser(["require", "verify-full"]),
        )
        .arg(
            Arg::new("tls-ca")
                .env("CERTPULSE_TLS_CA")
                .help("Path to CA certificate file for verify-full")
                .long("tls-ca")
                .long_help(
                    "Path to Certificate Authority (CA) certificate file.\n\
                    Used by verify-full instead of the bundled webpki roots.\n\n\
                    Example: /etc/ssl/certs/ca-certificates.crt"
                )
                .value_name("PATH"),
        )
        .arg(
            Arg::new("json")
                .env("CERTPULSE_JSON")
                .help("Print the check report as JSON")
                .long("json")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .help("Increase log verbosity (-v debug, -vv trace)")
                .long("verbose")
                .short('v')
                .action(ArgAction::Count),
        )
}
