//! PDF rendering via a wkhtmltopdf subprocess.
//!
//! HTML goes in on stdin, the PDF comes back on stdout. The child is spawned
//! with kill_on_drop so an abandoned render (client disconnect, timeout)
//! never leaves a renderer process behind.

use std::process::Stdio;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, error};

use crate::error::ApiError;

#[derive(Clone)]
pub struct PdfRenderer {
    binary: String,
    timeout: Duration,
}

/// A4 geometry matching the report stylesheet.
fn render_args() -> Vec<&'static str> {
    vec![
        "--quiet",
        "--print-media-type",
        "--page-size",
        "A4",
        "--margin-top",
        "1in",
        "--margin-bottom",
        "0.75in",
        "--margin-left",
        "0.5in",
        "--margin-right",
        "0.5in",
        "--encoding",
        "utf-8",
        "-",
        "-",
    ]
}

impl PdfRenderer {
    pub fn new(binary: &str, timeout_seconds: u64) -> Self {
        Self {
            binary: binary.to_string(),
            timeout: Duration::from_secs(timeout_seconds),
        }
    }

    /// Renders one HTML document to PDF bytes.
    pub async fn render(&self, html: &str) -> Result<Vec<u8>, ApiError> {
        debug!(binary = %self.binary, html_len = html.len(), "Rendering PDF");

        let mut child = Command::new(&self.binary)
            .args(render_args())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                error!(error = %e, binary = %self.binary, "Failed to spawn PDF renderer");
                ApiError::Internal(anyhow::anyhow!("PDF renderer unavailable: {}", e))
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(html.as_bytes()).await.map_err(|e| {
                ApiError::Internal(anyhow::anyhow!("Failed to write to PDF renderer: {}", e))
            })?;
            // closes stdin so the renderer sees EOF
        }

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| {
                error!(timeout = ?self.timeout, "PDF render timed out");
                ApiError::Internal(anyhow::anyhow!("PDF render timed out"))
            })?
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("PDF renderer failed: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!(status = ?output.status, stderr = %stderr, "PDF renderer exited with error");
            return Err(ApiError::Internal(anyhow::anyhow!(
                "PDF renderer exited with {}",
                output.status
            )));
        }
        if output.stdout.is_empty() {
            return Err(ApiError::Internal(anyhow::anyhow!(
                "PDF renderer produced no output"
            )));
        }
        Ok(output.stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_carry_report_geometry_and_stdio_markers() {
        let args = render_args();
        let joined = args.join(" ");
        assert!(joined.contains("--page-size A4"));
        assert!(joined.contains("--margin-top 1in"));
        assert!(joined.contains("--margin-bottom 0.75in"));
        assert!(joined.contains("--margin-left 0.5in"));
        assert!(joined.contains("--margin-right 0.5in"));
        assert!(joined.contains("--print-media-type"));
        // stdin/stdout markers last
        assert_eq!(&args[args.len() - 2..], ["-", "-"]);
    }
}
