//! Terminal progress bar fed by registry progress events

use std::io::{self, Write};

use tracing::debug;

use crate::version::progress::{ProgressEvent, ProgressReceiver};

const TITLE: &str = "Retrieving packages: ";

/// Widest bar drawn; larger totals are scaled down to this
const MAX_BAR_WIDTH: usize = 40;

/// Single-line progress bar, redrawn in place with `\r`
pub struct ProgressBar<W: Write> {
    writer: W,
    total: usize,
    done: usize,
}

impl<W: Write> ProgressBar<W> {
    pub fn new(writer: W, total: usize) -> Self {
        Self {
            writer,
            total,
            done: 0,
        }
    }

    pub fn advance(&mut self) -> io::Result<()> {
        self.done = (self.done + 1).min(self.total);
        self.draw()
    }

    pub fn draw(&mut self) -> io::Result<()> {
        let width = self.total.min(MAX_BAR_WIDTH);
        let filled = if self.total == 0 {
            width
        } else {
            self.done * width / self.total
        };

        write!(
            self.writer,
            "\r{}[{}{}] {}/{}",
            TITLE,
            "=".repeat(filled),
            " ".repeat(width - filled),
            self.done,
            self.total
        )?;
        self.writer.flush()
    }

    /// End the progress line and hand back the writer
    pub fn finish(mut self) -> io::Result<W> {
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Draw `bar` and advance it for every fetched catalog until all senders
/// are dropped.
pub async fn drain<W: Write>(
    mut receiver: ProgressReceiver,
    mut bar: ProgressBar<W>,
) -> io::Result<W> {
    bar.draw()?;

    while let Some(event) = receiver.recv().await {
        match event {
            ProgressEvent::CatalogFetched {
                package_name,
                version_count,
            } => {
                debug!("{} versions of {} retrieved", version_count, package_name);
                bar.advance()?;
            }
        }
    }

    bar.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::progress;

    fn fetched(name: &str) -> ProgressEvent {
        ProgressEvent::CatalogFetched {
            package_name: name.to_string(),
            version_count: 3,
        }
    }

    #[tokio::test]
    async fn drain_redraws_bar_for_each_event() {
        let (tx, rx) = progress::channel();
        tx.send(fetched("Serilog")).unwrap();
        tx.send(fetched("Dapper")).unwrap();
        drop(tx);

        let output = drain(rx, ProgressBar::new(Vec::new(), 2)).await.unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            concat!(
                "\rRetrieving packages: [  ] 0/2",
                "\rRetrieving packages: [= ] 1/2",
                "\rRetrieving packages: [==] 2/2",
                "\n"
            )
        );
    }

    #[test]
    fn draw_scales_large_totals() {
        let mut bar = ProgressBar::new(Vec::new(), 80);
        for _ in 0..40 {
            bar.advance().unwrap();
        }

        let output = String::from_utf8(bar.finish().unwrap()).unwrap();
        let last = output.trim_end().rsplit('\r').next().unwrap();

        assert_eq!(
            last,
            format!("{}[{}{}] 40/80", TITLE, "=".repeat(20), " ".repeat(20))
        );
    }

    #[test]
    fn advance_never_exceeds_total() {
        let mut bar = ProgressBar::new(Vec::new(), 1);
        bar.advance().unwrap();
        bar.advance().unwrap();

        let output = String::from_utf8(bar.finish().unwrap()).unwrap();
        assert!(output.trim_end().ends_with("] 1/1"));
    }
}
