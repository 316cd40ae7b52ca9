use colored::{Color, Colorize};
use serde::Serialize;

use crate::safe_truncate;

const MAX_BODY_CHARS: usize = 5000;
const RULE_WIDTH: usize = 80;

fn open_frame(title: &str, color: Color) {
    let rule = "═".repeat(RULE_WIDTH);
    println!("\n{}", rule.color(color));
    println!("{}", title.color(color).bold());
    println!("{}", rule.color(color));
}

fn close_frame(color: Color) {
    println!("{}\n", "═".repeat(RULE_WIDTH).color(color));
}

fn field(name: &str, value: impl std::fmt::Display) {
    println!("{}: {}", name.bright_yellow(), value);
}

/// Print the outbound chat request when verbose output is on
pub fn log_request<T: Serialize>(url: &str, request: &T, verbose: bool) {
    if !verbose {
        return;
    }

    open_frame("🔍 CHAT REQUEST", Color::BrightCyan);
    field("POST", url);
    if let Ok(parsed) = reqwest::Url::parse(url) {
        field("Host", parsed.host_str().unwrap_or("unknown"));
        if let Some(port) = parsed.port_or_known_default() {
            field("Port", port);
        }
    }
    println!("{}", "Accept / Content-Type: application/json".bright_black());

    println!("\n{}", "Body:".bright_yellow());
    match serde_json::to_string_pretty(request) {
        Ok(json) => print_body(&json),
        Err(e) => println!("{}", format!("<unserializable request: {}>", e).red()),
    }
    close_frame(Color::BrightCyan);
}

/// Print the backend's answer when verbose output is on
pub fn log_response(
    status: &reqwest::StatusCode,
    headers: &reqwest::header::HeaderMap,
    body: &str,
    verbose: bool,
) {
    if !verbose {
        return;
    }

    let color = if status.is_success() { Color::BrightGreen } else { Color::BrightRed };
    open_frame("📥 CHAT RESPONSE", color);
    field(
        "Status",
        format!("{} {}", status.as_u16(), status.canonical_reason().unwrap_or("")),
    );
    for (name, value) in headers {
        if let Ok(value) = value.to_str() {
            println!("  {}: {}", name.as_str().bright_white(), value);
        }
    }

    println!("\n{}", "Body:".bright_yellow());
    let pretty = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| serde_json::to_string_pretty(&v).ok());
    print_body(pretty.as_deref().unwrap_or(body));
    close_frame(color);
}

fn print_body(body: &str) {
    if body.chars().count() <= MAX_BODY_CHARS {
        println!("{}", body);
        return;
    }
    println!("{}", safe_truncate(body, MAX_BODY_CHARS));
    println!("{}", format!("... ({} bytes in total)", body.len()).bright_black());
}
