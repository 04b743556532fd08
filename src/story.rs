// src/story.rs
// Story import: the ordered photo links of an HTML page, checked against the
// pool and grouped into reveal steps.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::pool::PhotoPool;

/// `href` values of the `<a>` tags in `html`, in document order.
/// Only quoted values are taken; tag and attribute names are case-insensitive.
pub fn extract_hrefs(html: &str) -> Vec<String> {
    // ASCII lowercasing keeps byte offsets, so positions index into `html` too
    let lower = html.to_ascii_lowercase();
    let mut hrefs = Vec::new();
    let mut cursor = 0;

    while let Some(found) = lower[cursor..].find("<a") {
        let tag_start = cursor + found + 2;
        let tag_end = match lower[tag_start..].find('>') {
            Some(offset) => tag_start + offset,
            None => break,
        };
        cursor = tag_end;

        // `<abbr>`, `<audio>`... are not anchors
        if !lower[tag_start..].starts_with(|c: char| c.is_ascii_whitespace()) {
            continue;
        }

        if let Some(value) = href_value(&html[tag_start..tag_end], &lower[tag_start..tag_end]) {
            hrefs.push(value);
        }
    }

    hrefs
}

fn href_value(tag: &str, lower_tag: &str) -> Option<String> {
    let mut search = 0;

    while let Some(found) = lower_tag[search..].find("href") {
        let name_start = search + found;
        search = name_start + 4;

        let preceded_by_space = lower_tag[..name_start]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_ascii_whitespace());
        if !preceded_by_space {
            continue;
        }

        let rest = lower_tag[search..].trim_start();
        let Some(rest) = rest.strip_prefix('=') else {
            continue;
        };
        let rest = rest.trim_start();
        let Some(quote) = rest.chars().next().filter(|&c| c == '"' || c == '\'') else {
            continue;
        };

        let value_start = lower_tag.len() - rest.len() + 1;
        let value_len = tag[value_start..].find(quote)?;
        let value = &tag[value_start..value_start + value_len];
        if !value.is_empty() {
            return Some(value.to_string());
        }
    }

    None
}

/// Photos revealed together in one step of a story.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RevealStep {
    pub label: String,
    pub entries: Vec<String>,
}

#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct StorySequence {
    valid: Vec<String>,
    unmatched: Vec<String>,
}

impl StorySequence {
    pub fn from_hrefs<I>(hrefs: I, pool: &PhotoPool) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let (valid, unmatched) = hrefs.into_iter().partition(|href| pool.contains(href));
        StorySequence { valid, unmatched }
    }

    pub fn from_html(html: &str, pool: &PhotoPool) -> Self {
        Self::from_hrefs(extract_hrefs(html), pool)
    }

    pub fn from_file<P: AsRef<Path>>(path: P, pool: &PhotoPool) -> Result<Self> {
        let html = fs::read_to_string(path)?;
        Ok(Self::from_html(&html, pool))
    }

    /// Links that are pool photos, in story order.
    pub fn valid(&self) -> &[String] {
        &self.valid
    }

    /// Links that matched no pool photo.
    pub fn unmatched(&self) -> &[String] {
        &self.unmatched
    }

    /// Group the valid links into steps.
    ///
    /// Photos under `priority_folder/<place>/` share the step `priority_folder/<place>`;
    /// any other photo joins the step named after its parent folder.
    /// Steps are ordered by their first appearance.
    pub fn steps(&self, priority_folder: Option<&str>) -> Vec<RevealStep> {
        let mut steps: Vec<RevealStep> = Vec::new();

        for entry in &self.valid {
            let label = step_label(entry, priority_folder);
            match steps.iter_mut().find(|step| step.label == label) {
                Some(step) => step.entries.push(entry.clone()),
                None => steps.push(RevealStep { label, entries: vec![entry.clone()] }),
            }
        }

        steps
    }
}

fn step_label(entry: &str, priority_folder: Option<&str>) -> String {
    let mut parts = entry.split('/');
    if let (Some(first), Some(second), Some(folder)) = (parts.next(), parts.next(), priority_folder) {
        if first == folder {
            return format!("{first}/{second}");
        }
    }

    match entry.rsplit_once('/') {
        Some((parent, _)) if !parent.is_empty() => parent.to_string(),
        _ => entry.to_string(),
    }
}
