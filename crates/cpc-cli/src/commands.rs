//! Command implementations.

use std::fs;
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::info;

use cpc_api::{ApiClient, Config, payload::endpoint_path};
use cpc_counter::{LiveCounter, POLL_INTERVAL};
use cpc_forms::{FormSession, catalog};
use cpc_model::FormKind;

use crate::cli::CheckArgs;

/// How often the watch loop redraws the eased display value.
const WATCH_FRAME: Duration = Duration::from_millis(250);

/// Build a client from CLI configuration.
pub fn build_client(base_url: Option<&str>) -> Result<ApiClient> {
    let config = match base_url {
        Some(url) => Config::with_base_url(url),
        None => Config::from_env(),
    };
    ApiClient::new(&config).context("building API client")
}

/// Fetch the count once and print it.
pub fn run_count(client: &ApiClient, record_visit: bool) -> Result<()> {
    if record_visit {
        client.increment_visits();
    }
    let count = client.get_visit_count().context("fetching visitor count")?;
    println!("{}", count.total_visits);
    Ok(())
}

/// Poll the count at the standard interval, printing the animated display
/// value whenever it moves. Runs until interrupted.
pub fn run_watch(client: &ApiClient) -> Result<()> {
    let counter = LiveCounter::new();
    info!(interval_secs = POLL_INTERVAL.as_secs(), "watching visitor count");

    let mut last_shown: Option<u64> = None;
    loop {
        let now = Instant::now();
        if counter.poll_due(now) {
            counter.refresh(client, now);
            if let Some(message) = counter.load_state().error_message() {
                eprintln!("warning: {message}");
            }
        }
        let shown = counter.displayed(Instant::now());
        if last_shown != Some(shown) {
            println!("{shown}");
            last_shown = Some(shown);
        }
        thread::sleep(WATCH_FRAME);
    }
}

/// Print the form catalog.
pub fn run_forms() {
    for kind in FormKind::all() {
        let schema = catalog::schema(kind);
        println!("{} (POST {})", kind.label(), endpoint_path(kind));
        for rule in &schema.fields {
            let mut notes: Vec<String> = Vec::new();
            if rule.required {
                notes.push("required".to_string());
            }
            if let Some(exact) = rule.exact_len {
                notes.push(format!("{exact} digits"));
            }
            if let Some(max) = rule.max_len {
                notes.push(format!("max {max} chars"));
            }
            if let Some(limit) = rule.word_limit {
                notes.push(format!("max {} words", limit.max_words));
            }
            if let Some(constraint) = &rule.file {
                notes.push(format!(
                    "file: {} up to {} bytes",
                    constraint.allowed_types.join("/"),
                    constraint.max_bytes
                ));
            }
            println!("  {} ({})", rule.name, notes.join(", "));
        }
        if let Some(selection) = &schema.selection {
            println!(
                "  {} + {} ({}..={} of them)",
                selection.category_field,
                selection.sub_items_field,
                selection.min_sub_items,
                selection.max_sub_items
            );
        }
        if schema.requires_captcha {
            println!("  captchaToken (required)");
        }
        println!();
    }
}

/// Validate a draft file against a form's rules. Returns whether the
/// draft is clean.
pub fn run_check(args: &CheckArgs) -> Result<bool> {
    let kind = FormKind::from(args.form);
    let mut session = load_draft(kind, &args.draft)?;

    if session.validate() {
        println!("ok: draft satisfies {}", kind.label());
        return Ok(true);
    }

    let field_names: Vec<String> = session
        .schema()
        .fields
        .iter()
        .map(|rule| rule.name.clone())
        .collect();
    for name in field_names {
        if let Some(message) = session.field_error(&name) {
            println!("{name}: {message}");
        }
    }
    for message in session.form_errors() {
        println!("form: {message}");
    }
    Ok(false)
}

fn load_draft(kind: FormKind, path: &Path) -> Result<FormSession> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading draft {}", path.display()))?;
    let draft: Value = serde_json::from_str(&text)
        .with_context(|| format!("parsing draft {}", path.display()))?;
    let Value::Object(entries) = draft else {
        anyhow::bail!("draft must be a JSON object of field values");
    };

    let mut session = FormSession::new(catalog::schema(kind));
    let selection = session.schema().selection.clone();

    for (key, value) in entries {
        if let Some(selection) = &selection {
            if key == selection.category_field {
                if let Some(name) = value.as_str() {
                    session.select_category(name);
                }
                continue;
            }
            if key == selection.sub_items_field {
                select_sub_items(&mut session, &value);
                continue;
            }
        }
        if key == "captchaToken" {
            if let Some(token) = value.as_str() {
                session.set_captcha_token(token);
            }
            continue;
        }
        match value {
            Value::String(text) => session.set_field(&key, &text),
            other => session.set_field(&key, &other.to_string()),
        }
    }
    Ok(session)
}

fn select_sub_items(session: &mut FormSession, value: &Value) {
    match value {
        Value::String(item) => {
            session.select_sub_item(item);
        }
        Value::Array(items) => {
            for item in items.iter().filter_map(Value::as_str) {
                session.select_sub_item(item);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_round_trips_through_the_session() {
        let dir = std::env::temp_dir().join("cpc-check-test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("draft.json");
        fs::write(
            &path,
            serde_json::json!({
                "name": "Asha Rao",
                "number": "9876543210",
                "message": "Interested in product design",
                "department": "School of Design",
                "courses": ["B. Design Product"],
                "captchaToken": "token",
            })
            .to_string(),
        )
        .unwrap();

        let mut session = load_draft(FormKind::AdmissionInquiry, &path).unwrap();
        assert_eq!(session.field_text("name"), "Asha Rao");
        assert_eq!(session.category(), Some("School of Design"));
        assert_eq!(session.sub_items().len(), 1);
        assert!(session.validate());
    }

    #[test]
    fn incomplete_draft_fails_validation() {
        let dir = std::env::temp_dir().join("cpc-check-test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("incomplete.json");
        fs::write(&path, serde_json::json!({"name": "Asha"}).to_string()).unwrap();

        let mut session = load_draft(FormKind::AdmissionInquiry, &path).unwrap();
        assert!(!session.validate());
        assert_eq!(
            session.field_error("number"),
            Some("Phone number is required")
        );
    }
}
