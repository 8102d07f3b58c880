//! Markdown rendering for the command line front end
//!
//! Result lists, suggestion lists and tag dropdown contents, with query
//! matches in recipe names wrapped in `**bold**`.

use crate::recipes::{Recipe, TagKind};
use crate::search::{ResultsView, TagOptions};
use crate::text::{fold_char, normalize};

/// Bold every accent/case-insensitive occurrence of `query` in `text`
pub fn highlight_text(text: &str, query: &str) -> String {
    let needle = normalize(query);
    if needle.is_empty() {
        return text.to_string();
    }

    // Fold char by char, remembering which original char produced each folded byte.
    // Whitespace runs fold to one space, as in `normalize`.
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut folded = String::with_capacity(text.len());
    let mut owners: Vec<usize> = Vec::with_capacity(text.len());
    for (n, &(_, c)) in chars.iter().enumerate() {
        let piece = if c.is_whitespace() {
            if folded.ends_with(' ') {
                continue;
            }
            " ".to_string()
        } else {
            fold_char(c)
        };
        owners.extend(std::iter::repeat(n).take(piece.len()));
        folded.push_str(&piece);
    }

    let char_end = |n: usize| chars[n].0 + chars[n].1.len_utf8();

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    let mut from = 0usize;
    while let Some(pos) = folded[from..].find(&needle) {
        let start = from + pos;
        let end = start + needle.len();
        let first = owners[start];
        let mut last = owners[end - 1];
        // Keep trailing combining marks inside the bold span
        while last + 1 < chars.len() && fold_char(chars[last + 1].1).is_empty() && !chars[last + 1].1.is_whitespace() {
            last += 1;
        }
        ranges.push((chars[first].0, char_end(last)));
        from = end;
    }

    if ranges.is_empty() {
        return text.to_string();
    }

    // Merge overlapping and adjacent ranges
    let mut merged: Vec<(usize, usize)> = Vec::new();
    for (s, e) in ranges {
        match merged.last_mut() {
            Some(last) if s <= last.1 => last.1 = last.1.max(e),
            _ => merged.push((s, e)),
        }
    }

    let mut res = String::with_capacity(text.len() + merged.len() * 4);
    let mut last_idx = 0usize;
    for (s, e) in merged {
        res.push_str(&text[last_idx..s]);
        res.push_str("**");
        res.push_str(&text[s..e]);
        res.push_str("**");
        last_idx = e;
    }
    res.push_str(&text[last_idx..]);
    res
}

/// Render a result list; `highlight` is the query to bold, or empty
pub fn format_results(recipes: &[&Recipe], highlight: &str) -> String {
    if recipes.is_empty() {
        return "No recipe matches your search. You can try \"tarte aux pommes\", \"poisson\", etc.\n"
            .to_string();
    }

    let mut markdown = format!("# {}\n\n", count_label(recipes.len()));
    let cards: Vec<String> = recipes.iter().map(|recipe| recipe.to_markdown(highlight)).collect();
    markdown.push_str(&cards.join("\n---\n\n"));
    markdown
}

/// "1 recipe", "12 recipes"
pub fn count_label(count: usize) -> String {
    if count == 1 {
        "1 recipe".to_string()
    } else {
        format!("{} recipes", count)
    }
}

pub fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        return "No suggestions\n".to_string();
    }
    suggestions.iter().map(|s| format!("- {}\n", s)).collect()
}

/// Render dropdown lists, all three or just one kind
pub fn format_tag_options(options: &TagOptions, only: Option<TagKind>) -> String {
    let kinds: Vec<TagKind> = match only {
        Some(kind) => vec![kind],
        None => TagKind::ALL.to_vec(),
    };

    let mut markdown = String::new();
    for kind in kinds {
        let title = match kind {
            TagKind::Ingredient => "Ingredients",
            TagKind::Appliance => "Appliances",
            TagKind::Ustensil => "Ustensils",
        };
        markdown.push_str(&format!("## {}\n\n", title));
        let values = options.get(kind);
        if values.is_empty() {
            markdown.push_str("_none_\n");
        }
        for value in values {
            markdown.push_str(&format!("- {}\n", value));
        }
        markdown.push('\n');
    }
    markdown
}

/// Collects rendered results and the result count
#[derive(Debug, Default)]
pub struct MarkdownView {
    highlight: String,
    pub output: String,
    pub count: usize,
}

impl MarkdownView {
    pub fn new(highlight: impl Into<String>) -> Self {
        Self {
            highlight: highlight.into(),
            ..Self::default()
        }
    }
}

impl ResultsView for MarkdownView {
    fn render_results(&mut self, recipes: &[&Recipe]) {
        self.count = recipes.len();
        self.output = format_results(recipes, &self.highlight);
    }
}
