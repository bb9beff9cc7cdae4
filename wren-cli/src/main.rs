//! Wren CLI
//!
//! A headless front end for inspecting and screenshotting documents.
//!
//! Usage:
//! - wren page.html                      # Print the DOM tree
//! - wren --dump layout page.html        # Print the layout tree
//! - wren --dump styles --json URL       # Computed styles as JSON
//! - wren -S out.png URL                 # Take a screenshot
//! - wren --click 20,30 page.html        # Which link is at (20, 30)?

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Parser, ValueEnum};
use owo_colors::OwoColorize;
use serde::Serialize;
use wren_browser::{Browser, BrowserConfig, load_source};
use wren_css::{BoxSummary, ComputedStyle};
use wren_dom::DomTree;
use wren_html::{Token, dump_tree, tokenize};

#[derive(Parser, Debug)]
#[command(name = "wren")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the DOM tree of a file
    wren page.html

    # Layout tree of a web page at a narrow width
    wren --width 400 --dump layout https://example.com

    # Computed styles as JSON
    wren --dump styles --json --html '<p style="color: red">Hi</p>'

    # Take a screenshot
    wren -S screenshot.png https://example.com

    # Resolve the link under a point
    wren --click 20,30 page.html
"#)]
struct Cli {
    /// Path to an HTML file or an http(s) URL
    #[arg(value_name = "FILE|URL", required_unless_present = "html")]
    source: Option<String>,

    /// Render an HTML string instead of a file
    #[arg(long, value_name = "HTML", conflicts_with = "source")]
    html: Option<String>,

    /// Viewport width in pixels
    #[arg(long, default_value_t = 800.0)]
    width: f32,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 600.0)]
    height: f32,

    /// Font file to measure and draw text with (default: search the system)
    #[arg(long, value_name = "FILE")]
    font: Option<PathBuf>,

    /// Print an intermediate stage of the pipeline
    #[arg(long, value_enum)]
    dump: Option<Dump>,

    /// Print the styles or layout dump as JSON
    #[arg(long, requires = "dump")]
    json: bool,

    /// Take a screenshot and save it to the given file (PNG format)
    #[arg(short = 'S', long, value_name = "FILE")]
    screenshot: Option<PathBuf>,

    /// Print the link target under a viewport point
    #[arg(long, value_name = "X,Y", value_parser = parse_point)]
    click: Option<(f32, f32)>,
}

/// Pipeline stages `--dump` can print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Dump {
    /// HTML tokens
    Tokens,
    /// The DOM tree
    Dom,
    /// Computed style of every element
    Styles,
    /// The layout tree
    Layout,
}

/// Parse `X,Y` into a point.
fn parse_point(text: &str) -> Result<(f32, f32), String> {
    let (x, y) = text
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{text}'"))?;
    let coord = |part: &str| {
        part.trim()
            .parse::<f32>()
            .map_err(|e| format!("invalid coordinate '{part}': {e}"))
    };
    Ok((coord(x)?, coord(y)?))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.json && matches!(cli.dump, Some(Dump::Tokens | Dump::Dom)) {
        bail!("--json is only available for the styles and layout dumps");
    }

    // Tokens come straight from the source; nothing else runs.
    if cli.dump == Some(Dump::Tokens) {
        let html = match (&cli.html, &cli.source) {
            (Some(html), _) => html.clone(),
            (None, Some(source)) => load_source(source)?,
            (None, None) => bail!("a file, URL or --html is required"),
        };
        print_tokens(&tokenize(&html)?);
        return Ok(());
    }

    let mut browser = Browser::new(BrowserConfig {
        width: cli.width,
        height: cli.height,
        font_path: cli.font.clone(),
    });
    let loaded = match (&cli.html, &cli.source) {
        (Some(html), _) => browser.load_html(html, None),
        (None, Some(source)) => browser.navigate(source),
        (None, None) => bail!("a file, URL or --html is required"),
    };
    if let Err(e) = loaded {
        eprintln!("{} {e}; showing the error page", "error:".red().bold());
    }
    // There is no later frame to pick images up in.
    let _ = browser.wait_for_images();

    if let Some((x, y)) = cli.click {
        match browser.click(x, y) {
            Some(href) => println!("{href}"),
            None => println!("{}", format!("no link at ({x}, {y})").dimmed()),
        }
    }

    match cli.dump {
        Some(Dump::Dom) => print_dom(&browser),
        Some(Dump::Styles) if cli.json => print_styles_json(&browser)?,
        Some(Dump::Styles) => print_styles(&browser),
        Some(Dump::Layout) if cli.json => print_layout_json(&browser)?,
        Some(Dump::Layout) => print_layout(&browser),
        Some(Dump::Tokens) => {}
        None if cli.screenshot.is_none() && cli.click.is_none() => print_dom(&browser),
        None => {}
    }

    if let Some(ref output_path) = cli.screenshot {
        let renderer = browser.rasterize()?;
        renderer.save_png(output_path)?;
        println!("Screenshot saved to: {}", output_path.display());
    }

    Ok(())
}

fn print_tokens(tokens: &[Token]) {
    for token in tokens {
        match token {
            Token::StartTag { name, attributes } => {
                let attrs: Vec<String> = attributes
                    .iter()
                    .map(|(k, v)| format!("{k}=\"{v}\""))
                    .collect();
                println!(
                    "{} {} {}",
                    "StartTag".cyan(),
                    name.bold(),
                    attrs.join(" ").dimmed()
                );
            }
            Token::EndTag { name } => println!("{} {}", "EndTag".magenta(), name.bold()),
            Token::Text(text) => println!("{} {:?}", "Text".green(), text),
        }
    }
}

fn document(browser: &Browser) -> Option<&DomTree> {
    let dom = browser.dom();
    if dom.is_none_or(|dom| dom.root().is_none()) {
        println!("{}", "(empty document)".dimmed());
        return None;
    }
    dom
}

fn print_dom(browser: &Browser) {
    let Some(dom) = document(browser) else {
        return;
    };
    println!("{}", "=== DOM Tree ===".bold());
    for line in dump_tree(dom).lines() {
        if line.trim_start().starts_with('<') {
            println!("{}", line.cyan());
        } else {
            println!("{}", line.green());
        }
    }
}

/// One element and its computed style, for `--json`.
#[derive(Serialize)]
struct StyledElement<'a> {
    node: usize,
    tag: &'a str,
    style: &'a ComputedStyle,
}

fn styled_elements(browser: &Browser) -> Vec<StyledElement<'_>> {
    let (Some(dom), Some(styles)) = (browser.dom(), browser.styles()) else {
        return Vec::new();
    };
    dom.breadth_first()
        .filter_map(|id| {
            Some(StyledElement {
                node: id.0,
                tag: dom.tag_name(id)?,
                style: styles.get(id)?,
            })
        })
        .collect()
}

fn print_styles(browser: &Browser) {
    if document(browser).is_none() {
        return;
    }
    println!("{}", "=== Computed Styles ===".bold());
    for element in styled_elements(browser) {
        let style = element.style;
        println!("{} {}", format!("<{}>", element.tag).cyan(), format!("#{}", element.node).dimmed());
        println!(
            "  display: {}; position: {}; color: {}; background: {}",
            style.display, style.position, style.color, style.background_color
        );
        println!(
            "  font: {}px weight {}{}; margin: {} {} {} {}; padding: {} {} {} {}",
            style.font.size,
            style.font.weight,
            if style.font.italic { " italic" } else { "" },
            style.margin.top,
            style.margin.right,
            style.margin.bottom,
            style.margin.left,
            style.padding.top,
            style.padding.right,
            style.padding.bottom,
            style.padding.left,
        );
    }
}

fn print_styles_json(browser: &Browser) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&styled_elements(browser))?);
    Ok(())
}

fn print_layout(browser: &Browser) {
    let Some(root) = browser.layout() else {
        println!("{}", "(no layout tree)".dimmed());
        return;
    };
    let viewport = browser.viewport();
    println!(
        "{}",
        format!(
            "=== Layout Tree (viewport: {}x{}) ===",
            viewport.width, viewport.height
        )
        .bold()
    );
    print_layout_box(&root.summary(), 0, false);
}

/// Print a box outline; coordinates are relative to the parent box.
fn print_layout_box(summary: &BoxSummary, depth: usize, out_of_flow: bool) {
    let indent = "  ".repeat(depth);
    let name = match (summary.kind, &summary.label) {
        ("element", Some(tag)) => format!("<{tag}>").cyan().to_string(),
        ("word", Some(word)) => format!("{word:?}").green().to_string(),
        (kind, Some(label)) => format!("{kind} {label}"),
        (kind, None) => kind.to_string(),
    };
    let rect = summary.rect;
    println!(
        "{indent}{name}{} {}",
        if out_of_flow { " (out of flow)" } else { "" },
        format!(
            "x={:.1} y={:.1} w={:.1} h={:.1}",
            rect.x, rect.y, rect.width, rect.height
        )
        .dimmed()
    );
    for child in &summary.children {
        print_layout_box(child, depth + 1, false);
    }
    for child in &summary.out_of_flow {
        print_layout_box(child, depth + 1, true);
    }
}

fn print_layout_json(browser: &Browser) -> Result<()> {
    match browser.layout() {
        Some(root) => println!("{}", serde_json::to_string_pretty(&root.summary())?),
        None => println!("null"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("20,30"), Ok((20.0, 30.0)));
        assert_eq!(parse_point(" 1.5 , 2 "), Ok((1.5, 2.0)));
        assert!(parse_point("20").is_err());
        assert!(parse_point("a,b").is_err());
    }

    #[test]
    fn test_arguments_parse() {
        let cli = Cli::try_parse_from([
            "wren", "--dump", "layout", "--json", "--width", "400", "page.html",
        ])
        .unwrap();
        assert_eq!(cli.dump, Some(Dump::Layout));
        assert!(cli.json);
        assert!((cli.width - 400.0).abs() < f32::EPSILON);
        assert_eq!(cli.source.as_deref(), Some("page.html"));

        assert!(Cli::try_parse_from(["wren"]).is_err());
        assert!(Cli::try_parse_from(["wren", "--json", "page.html"]).is_err());
    }

    #[test]
    fn test_styled_elements_skip_text() {
        let mut browser = Browser::with_services(
            BrowserConfig::default(),
            Box::new(wren_css::ApproximateFontMetrics),
            wren_browser::ImageCache::new(),
        );
        browser
            .load_html(r#"<div><p style="color: red">Hi</p></div>"#, None)
            .unwrap();
        let elements = styled_elements(&browser);
        let tags: Vec<&str> = elements.iter().map(|e| e.tag).collect();
        assert_eq!(tags, ["div", "p"]);
        assert_eq!(elements[1].style.color.to_string(), "#ff0000");

        let json = serde_json::to_value(&elements).unwrap();
        assert_eq!(json[1]["tag"], "p");
    }
}
