use outcome_rail::prelude::*;
use outcome_rail::CauseFormatConfig;

tagged_error! {
    #[derive(Debug, Clone, PartialEq)]
    pub enum ConfigError {
        Missing { key: String },
        Invalid(String),
        Locked,
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Missing { key } => write!(f, "missing key `{}`", key),
            ConfigError::Invalid(reason) => write!(f, "invalid value: {}", reason),
            ConfigError::Locked => f.write_str("config file is locked"),
        }
    }
}

fn read_port(raw: Option<&str>) -> AsyncResult<u16, ConfigError> {
    match raw {
        None => AsyncResult::fail(ConfigError::Missing { key: "port".into() }),
        Some(text) => text
            .parse::<u16>()
            .map_err(|e| ConfigError::Invalid(e.to_string()))
            .into_async_result(),
    }
}

fn describe(result: &AsyncResult<u16, ConfigError>) -> String {
    result
        .builder()
        .on_success(|port, _| format!("listening on {}", port))
        .on_error_tag("Missing", |_, _| "falling back to 8080".to_string())
        .on_error_tag("Invalid", |e, _| format!("rejected: {}", e))
        .on_error_tag("Locked", |_, _| "waiting for lock".to_string())
        .on_defect(|d, _| format!("bug: {}", d))
        .on_interrupt(|_| "cancelled".to_string())
        .or_else(|| "unknown failure".to_string())
}

fn main() {
    println!("Running Quick Start examples...");

    // 1. Matching a single result
    println!("\n1. Fluent matching:");
    for raw in [Some("8443"), Some("http"), None] {
        println!("- {:?}: {}", raw, describe(&read_port(raw)));
    }

    // 2. Checking that a chain handles every tag
    println!("\n2. Coverage:");
    let result = read_port(Some("80"));
    let chain = result.builder::<()>().on_error_tags(&["Missing", "Invalid"], |_, _| ());
    println!("unhandled tags: {:?}", chain.remaining_tags());

    // 3. Combining results
    println!("\n3. Combining results:");
    let ports: AsyncResult<Vec<u16>, ConfigError> =
        all([read_port(Some("80")).into(), Field::plain(443), read_port(Some("8080")).into()]);
    println!("ports: {:?}", ports.value());

    // 4. Rich causes
    println!("\n4. Causes:");
    let cause = Cause::fail(ConfigError::Locked)
        .both(Cause::die("watcher thread crashed"))
        .then(Cause::interrupt());
    println!("inline:  {}", cause);
    println!("labeled: {}", cause.render(&CauseFormatConfig::labeled()));
    println!("tree:\n{}", cause.pretty());
}
