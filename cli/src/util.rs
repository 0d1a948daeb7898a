use serde::Serialize;
use serde_json::json;

pub fn client() -> reqwest::Client {
    reqwest::Client::new()
}

pub fn exit_error(message: &str, docs_hint: Option<&str>) -> ! {
    let mut err = json!({
        "error": "cli_error",
        "message": message
    });
    if let Some(hint) = docs_hint {
        err["docs_hint"] = json!(hint);
    }
    eprintln!("{}", pretty(&err));
    std::process::exit(1);
}

/// Pretty JSON, falling back to compact output if pretty-printing fails.
pub fn pretty<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .or_else(|_| serde_json::to_string(value))
        .unwrap_or_else(|e| format!("{{\"error\":\"cli_error\",\"message\":\"{e}\"}}"))
}

pub fn print_json<T: Serialize>(value: &T) -> i32 {
    println!("{}", pretty(value));
    0
}

/// Join `segments` onto the base URL, percent-encoding each one so a segment
/// can never spill into the query or fragment.
pub fn endpoint_url(api_url: &str, segments: &[&str]) -> Result<reqwest::Url, String> {
    let mut url = reqwest::Url::parse(api_url).map_err(|e| format!("Invalid URL: {api_url}: {e}"))?;
    url.path_segments_mut()
        .map_err(|_| format!("Invalid URL: {api_url} cannot carry a path"))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Execute a request against a running WellCheck server and print the body.
///
/// Exit codes: 0=success (2xx), 1=client error (4xx), 2=server error (5xx),
///             3=connection error, 4=usage error
pub async fn api_request(
    api_url: &str,
    method: reqwest::Method,
    segments: &[&str],
    body: Option<serde_json::Value>,
) -> i32 {
    let url = match endpoint_url(api_url, segments) {
        Ok(u) => u,
        Err(message) => {
            let err = json!({
                "error": "cli_error",
                "message": message
            });
            eprintln!("{}", pretty(&err));
            return 4;
        }
    };

    let mut req = client().request(method, url);
    if let Some(b) = body {
        req = req.json(&b);
    }

    let resp = match req.send().await {
        Ok(r) => r,
        Err(e) => {
            let err = json!({
                "error": "connection_error",
                "message": format!("{e}"),
                "docs_hint": "Is the WellCheck server running? Check --api-url / WELLCHECK_API_URL."
            });
            eprintln!("{}", pretty(&err));
            return 3;
        }
    };

    let status = resp.status().as_u16();
    let exit_code = exit_code_for_status(status);

    let text = resp.text().await.unwrap_or_default();
    let rendered = match serde_json::from_str::<serde_json::Value>(&text) {
        Ok(value) => pretty(&value),
        Err(_) => text,
    };

    if exit_code == 0 {
        println!("{rendered}");
    } else {
        eprintln!("{rendered}");
    }
    exit_code
}

pub fn exit_code_for_status(status: u16) -> i32 {
    match status {
        200..=299 => 0,
        400..=499 => 1,
        _ => 2,
    }
}
