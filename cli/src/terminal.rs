//! Terminal transport and image pager.

use async_trait::async_trait;
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use answerkit::render::ImagePages;
use answerkit::{clean_content, Error, ImagePager, Transport};

/// Prints messages to stdout, enforcing a chat-style size limit.
pub struct StdoutTransport {
    limit: usize,
}

impl StdoutTransport {
    /// Create a transport rejecting messages over `limit` bytes.
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    /// Clean a message and check it against the limit.
    fn prepare(&self, content: &str) -> answerkit::Result<String> {
        let cleaned = clean_content(content);
        if cleaned.len() > self.limit {
            return Err(Error::TransportRejected {
                len: cleaned.len(),
                limit: self.limit,
            });
        }
        Ok(cleaned.into_owned())
    }
}

#[async_trait]
impl Transport for StdoutTransport {
    async fn send(&self, content: &str) -> answerkit::Result<()> {
        let message = self.prepare(content)?;
        write_message(&mut tokio::io::stdout(), &message).await
    }
}

async fn write_message<W>(out: &mut W, message: &str) -> answerkit::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let write = async {
        out.write_all(message.as_bytes()).await?;
        out.write_all(b"\n").await?;
        out.flush().await
    };
    write.await.map_err(|e| Error::Transport(e.to_string()))
}

/// Shows image references one page at a time.
pub struct TerminalPager {
    interactive: bool,
}

impl TerminalPager {
    /// Create a pager; a non-interactive pager lists every page at once.
    pub fn new(interactive: bool) -> Self {
        Self { interactive }
    }

    fn show(pages: &ImagePages, index: usize) {
        if let Some(page) = pages.page(index) {
            println!(
                "{} {}",
                format!("[{}/{}]", page.number, page.total).cyan(),
                page.url
            );
        }
    }
}

fn pager_error(err: std::io::Error) -> Error {
    Error::Pager(err.to_string())
}

#[async_trait]
impl ImagePager for TerminalPager {
    async fn paginate(&self, pages: &ImagePages) -> answerkit::Result<()> {
        if pages.is_empty() {
            return Ok(());
        }
        println!("\n{}", "Images".green().bold());
        if !self.interactive {
            for index in 0..pages.len() {
                Self::show(pages, index);
            }
            return Ok(());
        }

        let mut stdout = tokio::io::stdout();
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut index = 0;
        loop {
            Self::show(pages, index);
            stdout
                .write_all(b"[n]ext [p]revious [q]uit > ")
                .await
                .map_err(pager_error)?;
            stdout.flush().await.map_err(pager_error)?;

            let Some(input) = lines.next_line().await.map_err(pager_error)? else {
                return Ok(());
            };
            match input.trim() {
                "n" | "" => index = (index + 1) % pages.len(),
                "p" => index = (index + pages.len() - 1) % pages.len(),
                "q" => return Ok(()),
                _ => {}
            }
        }
    }
}
