use crate::prelude::{eprintln, *};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

/// Serve newline-delimited JSON-RPC requests from stdin until EOF
pub async fn run_stdio(global: crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!("doclist MCP server reading requests from stdin");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    let mut served = 0usize;

    while let Some(line) = lines.next_line().await? {
        let Some(reply) = respond(&line, &global).await? else {
            continue;
        };

        stdout.write_all(reply.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
        served += 1;
    }

    log::debug!("stdin closed after {served} requests");

    Ok(())
}

/// Answer one input line; blank lines get no reply
async fn respond(line: &str, global: &crate::Global) -> Result<Option<String>> {
    let request = line.trim();
    if request.is_empty() {
        return Ok(None);
    }

    if global.verbose {
        eprintln!("<- {request}");
    }

    let response = super::handle_request(request, global).await;
    let reply = serde_json::to_string(&response)?;

    if global.verbose {
        eprintln!("-> {reply}");
    }

    Ok(Some(reply))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn global() -> crate::Global {
        crate::Global {
            source_url: None,
            verbose: false,
        }
    }

    #[tokio::test]
    async fn test_respond_skips_blank_lines() {
        assert_eq!(respond("", &global()).await.unwrap(), None);
        assert_eq!(respond("   \r", &global()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_respond_writes_one_json_line() {
        let reply = respond(r#"  {"jsonrpc":"2.0","id":1,"method":"tools/list"}  "#, &global())
            .await
            .unwrap()
            .expect("reply");

        assert!(!reply.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&reply).unwrap();
        assert_eq!(value["id"], 1);
        assert_eq!(value["result"]["tools"][0]["name"], "doctors_list");
    }

    #[tokio::test]
    async fn test_respond_reports_parse_errors() {
        let reply = respond("not json", &global()).await.unwrap().expect("reply");

        let value: serde_json::Value = serde_json::from_str(&reply).unwrap();
        assert_eq!(value["error"]["code"], super::super::PARSE_ERROR);
    }
}
