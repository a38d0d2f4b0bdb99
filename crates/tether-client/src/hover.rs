//! Hover enrichment: trusted code fences and the rendered action bar.

use lsp_types::{HoverContents, MarkedString, MarkupContent, MarkupKind};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde_json::Value;
use tether_config::{Config, ExperimentalFeature};

use crate::display::{EditorHover, MarkupBlock};
use crate::protocol::{CommandLink, CommandLinkGroup, HoverWithActions};

/// Characters escaped in command-link arguments. Matches `encodeURIComponent`
/// except that quotes and parentheses are escaped too, since they delimit the
/// markdown link.
const COMMAND_ARGUMENTS: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*');

/// Separator between action groups; a horizontal rule in the hover widget.
pub const GROUP_SEPARATOR: &str = "___";

/// Separator between links inside one group.
pub const LINK_SEPARATOR: &str = " | ";

/// Converts protocol hovers into editor hovers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoverEnricher {
    fence: String,
    show_actions: bool,
}

impl HoverEnricher {
    /// Builds an enricher trusting fences tagged with `language`.
    #[must_use]
    pub fn new(language: &str, show_actions: bool) -> Self {
        Self {
            fence: format!("```{language}"),
            show_actions,
        }
    }

    /// Builds an enricher from client configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.hover().trusted_language.as_str(),
            config.is_enabled(ExperimentalFeature::HoverActions),
        )
    }

    /// Marks code-bearing blocks trusted and appends the action bar.
    #[must_use]
    pub fn enrich(&self, hover: HoverWithActions) -> EditorHover {
        let mut contents: Vec<MarkupBlock> = content_blocks(hover.hover.contents)
            .into_iter()
            .map(|block| self.trust_code_block(block))
            .collect();

        let bar = hover
            .actions
            .as_deref()
            .filter(|_| self.show_actions)
            .and_then(render_action_bar);
        if let Some(bar) = bar {
            contents.push(MarkupBlock::markdown(bar).trusted());
        }

        EditorHover {
            contents,
            range: hover.hover.range,
        }
    }

    fn trust_code_block(&self, block: MarkupBlock) -> MarkupBlock {
        if block.kind == MarkupKind::Markdown && block.value.contains(self.fence.as_str()) {
            block.trusted()
        } else {
            block
        }
    }
}

/// Renders all groups as one line, or `None` when there is nothing to show.
///
/// Groups without commands are skipped.
#[must_use]
pub fn render_action_bar(groups: &[CommandLinkGroup]) -> Option<String> {
    let rows: Vec<String> = groups
        .iter()
        .filter(|group| !group.commands.is_empty())
        .map(render_group)
        .collect();
    (!rows.is_empty()).then(|| rows.join(GROUP_SEPARATOR))
}

/// Renders `<title> <link> | <link>`; the title prefix is omitted when absent.
#[must_use]
pub fn render_group(group: &CommandLinkGroup) -> String {
    let rendered: Vec<String> = group.commands.iter().map(render_command_link).collect();
    let links = rendered.join(LINK_SEPARATOR);
    match group.title.as_deref() {
        Some(title) => format!("{title} {links}"),
        None => links,
    }
}

/// Renders a markdown link targeting a `command:` URI.
#[must_use]
pub fn render_command_link(link: &CommandLink) -> String {
    let payload = command_payload(&link.arguments);
    let arguments = utf8_percent_encode(&payload, COMMAND_ARGUMENTS);
    let tooltip = link.tooltip.as_deref().unwrap_or(link.title.as_str());
    format!(
        "[{}](command:{}?{} '{}')",
        escape_markdown(&link.title, &['\\', '[', ']']),
        link.command,
        arguments,
        escape_markdown(tooltip, &['\\', '\''])
    )
}

/// Backslash-escapes every occurrence of `special` in `text`.
fn escape_markdown(text: &str, special: &[char]) -> String {
    let mut escaped = String::with_capacity(text.len());
    for character in text.chars() {
        if special.contains(&character) {
            escaped.push('\\');
        }
        escaped.push(character);
    }
    escaped
}

// A command URI spreads an array payload into positional arguments and passes
// anything else as the single argument, so a lone non-array value is written
// bare.
fn command_payload(arguments: &[Value]) -> String {
    match arguments {
        [single] if !single.is_array() => single.to_string(),
        _ => Value::Array(arguments.to_vec()).to_string(),
    }
}

fn content_blocks(contents: HoverContents) -> Vec<MarkupBlock> {
    match contents {
        HoverContents::Scalar(marked) => vec![marked_block(marked)],
        HoverContents::Array(items) => items.into_iter().map(marked_block).collect(),
        HoverContents::Markup(MarkupContent { kind, value }) => vec![MarkupBlock {
            kind,
            value,
            is_trusted: false,
        }],
    }
}

fn marked_block(marked: MarkedString) -> MarkupBlock {
    match marked {
        MarkedString::String(text) => MarkupBlock::markdown(text),
        MarkedString::LanguageString(code) => {
            MarkupBlock::markdown(format!("```{}\n{}\n```", code.language, code.value))
        }
    }
}
