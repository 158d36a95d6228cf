use anyhow::Context;
use clap::Parser;
use gelf_writer::{GelfWriter, LogRecord, RecordLevel, RequestContext, WriterConfig};
use serde_json::Value;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Send one log record to a GELF collector
#[derive(Parser, Debug)]
#[command(name = "gelf-send", version)]
struct Args {
    /// YAML writer configuration (hostname, port, protocol, facility, additionalData)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Collector host, overrides the config file
    #[arg(long)]
    hostname: Option<String>,

    #[arg(long)]
    port: Option<u16>,

    /// tcp, udp or http
    #[arg(long)]
    protocol: Option<String>,

    /// Syslog level, as a number (0-7) or a name
    #[arg(short, long, default_value = "info")]
    level: RecordLevel,

    #[arg(long, default_value = "")]
    component: String,

    #[arg(long, default_value = "")]
    request_id: String,

    /// Extra field as key=value; values that parse as JSON keep their type
    #[arg(short, long = "data", value_parser = parse_key_value)]
    data: Vec<(String, String)>,

    #[arg(long)]
    request_host: Option<String>,

    #[arg(long)]
    request_url: Option<String>,

    #[arg(long)]
    request_method: Option<String>,

    #[arg(long)]
    query_string: Option<String>,

    message: String,
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{s}'"))?;
    Ok((key.to_string(), value.to_string()))
}

impl Args {
    fn writer_config(&self) -> anyhow::Result<WriterConfig> {
        let mut config = match &self.config {
            Some(path) => WriterConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => WriterConfig::default(),
        };

        if let Some(hostname) = &self.hostname {
            config = config.with_hostname(hostname.as_str());
        }
        if let Some(port) = self.port {
            config = config.with_port(port);
        }
        if let Some(protocol) = &self.protocol {
            config = config.with_protocol(protocol.as_str());
        }
        Ok(config)
    }

    fn record(&self) -> LogRecord {
        self.data.iter().fold(
            LogRecord::new(self.level.clone(), self.message.as_str())
                .with_component(self.component.as_str())
                .with_request_id(self.request_id.as_str()),
            |record, (key, raw)| {
                let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::from(raw.as_str()));
                record.with_field(key.as_str(), value)
            },
        )
    }

    fn request(&self) -> Option<RequestContext> {
        let request = RequestContext {
            host: self.request_host.clone(),
            url: self.request_url.clone(),
            method: self.request_method.clone(),
            query_string: self.query_string.clone(),
        };
        (request != RequestContext::default()).then_some(request)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let writer = GelfWriter::new(args.writer_config()?)?;
    let transport = writer.publisher().transport();
    info!(
        protocol = %transport.protocol(),
        collector = %transport.target(),
        "sending GELF message"
    );

    writer
        .try_write_log(&args.record(), args.request().as_ref())
        .await
        .context("delivering GELF message")?;

    info!("message delivered");
    Ok(())
}
