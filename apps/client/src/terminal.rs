//! Line-based terminal front-end for a review screen.

use std::io::Write;

use review_core::lesson::{highlight, Segment};
use review_core::stroke::Point;
use review_core::types::ScreenKind;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::progress::ProgressSink;
use crate::screen::ScreenController;
use crate::source::{ContentSource, Origin};

const HELP: &str =
    "[n]ext [p]rev [m]astered [f]avorite [w]riting [c]lear [s x,y x,y ...] stroke [q]uit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Next,
    Previous,
    Mastered,
    Favorite,
    Writing,
    Clear,
    /// One complete stroke through the given points.
    Stroke(Vec<Point>),
    Quit,
}

pub fn parse_command(line: &str) -> Option<Command> {
    let mut parts = line.split_whitespace();
    let command = match parts.next()? {
        "n" | "next" => Command::Next,
        "p" | "prev" => Command::Previous,
        "m" => Command::Mastered,
        "f" => Command::Favorite,
        "w" => Command::Writing,
        "c" => Command::Clear,
        "q" | "quit" => Command::Quit,
        "s" => {
            let points = parts.map(parse_point).collect::<Option<Vec<_>>>()?;
            if points.is_empty() {
                return None;
            }
            return Some(Command::Stroke(points));
        }
        _ => return None,
    };
    Some(command)
}

fn parse_point(raw: &str) -> Option<Point> {
    let (x, y) = raw.split_once(',')?;
    let x: f32 = x.parse().ok()?;
    let y: f32 = y.parse().ok()?;
    if !x.is_finite() || !y.is_finite() {
        return None;
    }
    Some(Point::new(x, y))
}

/// Read commands from `input` until `q` or end of input.
pub async fn run_session<S, P, R, W>(
    screen: &mut ScreenController<S, P>,
    input: R,
    out: &mut W,
) -> anyhow::Result<()>
where
    S: ContentSource,
    P: ProgressSink,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    render(screen, out)?;

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        match parse_command(&line) {
            Some(Command::Quit) => break,
            Some(command) => apply(screen, command),
            None => writeln!(out, "unknown command: {}\n{}", line.trim(), HELP)?,
        }
        render(screen, out)?;
    }

    screen.unmount();
    Ok(())
}

pub fn apply<S, P>(screen: &mut ScreenController<S, P>, command: Command)
where
    S: ContentSource,
    P: ProgressSink,
{
    match command {
        Command::Next => {
            screen.next();
        }
        Command::Previous => {
            screen.previous();
        }
        Command::Mastered => {
            screen.toggle_mastered();
        }
        Command::Favorite => {
            screen.toggle_favorite();
        }
        Command::Writing => {
            screen.toggle_writing_mode();
        }
        Command::Clear => screen.clear_strokes(),
        Command::Stroke(points) => {
            let mut points = points.into_iter();
            if let Some(start) = points.next() {
                screen.stroke_start(start);
                for point in points {
                    screen.stroke_move(point);
                }
                screen.stroke_end();
            }
        }
        Command::Quit => {}
    }
}

pub fn render<S, P, W>(screen: &ScreenController<S, P>, out: &mut W) -> std::io::Result<()>
where
    S: ContentSource,
    P: ProgressSink,
    W: Write,
{
    let (Some(info), Some((outer, inner)), Some(progress)) =
        (screen.info(), screen.current(), screen.progress())
    else {
        return writeln!(out, "loading...");
    };

    let source = match screen.origin() {
        Some(Origin::Fallback) => "  (built-in lesson)",
        _ => "",
    };
    writeln!(out, "HSK {} – {}  {}{}", info.hsk_level, info.title, progress, source)?;

    let mut flags = String::new();
    if screen.is_favorite() {
        flags.push_str(" ★");
    }
    if screen.is_mastered() {
        flags.push_str(" ✓");
    }
    writeln!(out, "{}  {}  {}{}", outer.word, outer.transliteration, outer.meaning, flags)?;

    if screen.kind() == ScreenKind::Grammar {
        let sentence: String = highlight(&inner.text, inner.keyword.as_deref())
            .into_iter()
            .map(|segment| match segment {
                Segment::Plain(text) => text.to_string(),
                Segment::Keyword(text) => format!("[{}]", text),
            })
            .collect();
        writeln!(out, "  {}", sentence)?;
        writeln!(out, "  {}", inner.transliteration)?;
        writeln!(out, "  {}", inner.translation)?;
    }

    if screen.writing_mode() {
        writeln!(out, "writing: {} stroke(s)", screen.strokes().finished().len())?;
        for path in screen.strokes().finished() {
            writeln!(out, "  {}", path)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::tests::RecordingSink;
    use crate::source::tests::{content, StaticSource};
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn parse_simple_commands() {
        assert_eq!(parse_command("n"), Some(Command::Next));
        assert_eq!(parse_command(" p "), Some(Command::Previous));
        assert_eq!(parse_command("q"), Some(Command::Quit));
        assert_eq!(parse_command("x"), None);
        assert_eq!(parse_command(""), None);
    }

    #[test]
    fn parse_stroke_points() {
        assert_eq!(
            parse_command("s 10,20 15.5,25"),
            Some(Command::Stroke(vec![Point::new(10.0, 20.0), Point::new(15.5, 25.0)]))
        );
        assert_eq!(parse_command("s"), None);
        assert_eq!(parse_command("s 1,2 oops"), None);
        assert_eq!(parse_command("s NaN,1"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn session_pages_and_draws() {
        let source = StaticSource(Some(content(&[("A", &[1, 2]), ("B", &[3])])));
        let mut screen = ScreenController::new(
            ScreenKind::Grammar,
            1,
            source,
            Arc::new(RecordingSink::default()),
            Duration::from_millis(500),
        );
        screen.load().await.unwrap();

        let input: &[u8] = b"n\nm\nw\ns 10,20 15,25\nbogus\nq\nn\n";
        let mut out = Vec::new();
        run_session(&mut screen, input, &mut out).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("HSK 1 – Bài 1  2/3"));
        assert!(text.contains("M10,20 L15,25"));
        assert!(text.contains("unknown command: bogus"));
        // Input after `q` is not processed.
        assert_eq!(screen.progress().unwrap().completed, 2);
        assert!(screen.is_mastered());
    }
}
