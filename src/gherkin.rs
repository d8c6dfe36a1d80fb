//! Line oriented reader for Gherkin `.feature` files.
//!
//! Covers the subset needed for documentation: feature header, tags,
//! free text descriptions, background, scenarios and outlines with their
//! steps, data tables, doc strings and examples.

use anyhow::{Result, bail};

/// Parsed feature file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Feature {
    pub name: String,
    /// Markdown text following the `Feature:` line
    pub description: String,
    pub tags: Vec<String>,
    pub background: Option<Scenario>,
    pub scenarios: Vec<Scenario>,
}

/// Scenario, scenario outline or background block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scenario {
    /// Keyword as written, e.g. `Scenario Outline`
    pub keyword: String,
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    pub steps: Vec<Step>,
    pub examples: Vec<Examples>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Step {
    pub keyword: String,
    pub text: String,
    pub argument: Option<StepArgument>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepArgument {
    Table(Table),
    DocString(String),
}

/// Examples block of a scenario outline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Examples {
    pub name: String,
    pub table: Table,
}

/// Pipe delimited table. The first row is the header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    pub fn body(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or(&[])
    }
}

const STEP_KEYWORDS: &[&str] = &["Given", "When", "Then", "And", "But", "*"];
const SCENARIO_KEYWORDS: &[&str] = &[
    "Scenario Outline",
    "Scenario Template",
    "Scenario",
    "Example",
];
const EXAMPLES_KEYWORDS: &[&str] = &["Examples", "Scenarios"];

/// Block currently receiving description lines and rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Preamble,
    Feature,
    Background,
    Scenario,
    Examples,
}

struct DocString {
    fence: &'static str,
    indent: usize,
    lines: Vec<String>,
}

struct Parser {
    feature: Option<Feature>,
    current: Option<Scenario>,
    is_background: bool,
    section: Section,
    pending_tags: Vec<String>,
    doc_string: Option<DocString>,
    /// Indent of the first description line in the current section
    description_indent: Option<usize>,
}

/// Parses the text of a `.feature` file.
///
/// # Errors
///
/// Returns error if the text has no `Feature:` header, contains text before
/// the header, or places steps, tables or free text where Gherkin does not
/// allow them. Messages carry the 1-based line number.
///
/// # Examples
///
/// ```
/// use featuredoc::parse_feature;
///
/// let feature = parse_feature(
///     "Feature: Checkout\n  Scenario: Pay\n    Given a cart\n    When I pay\n",
/// )?;
/// assert_eq!(feature.name, "Checkout");
/// assert_eq!(feature.scenarios[0].steps.len(), 2);
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn parse_feature(source: &str) -> Result<Feature> {
    let mut parser = Parser {
        feature: None,
        current: None,
        is_background: false,
        section: Section::Preamble,
        pending_tags: Vec::new(),
        doc_string: None,
        description_indent: None,
    };

    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    for (idx, line) in source.lines().enumerate() {
        parser.line(idx + 1, line)?;
    }

    parser.finish()
}

impl Parser {
    fn line(&mut self, number: usize, raw: &str) -> Result<()> {
        if let Some(doc) = self.doc_string.as_mut() {
            let trimmed = raw.trim();
            if trimmed == doc.fence {
                let doc = self.doc_string.take().map(|d| d.lines.join("\n"));
                let argument = StepArgument::DocString(doc.unwrap_or_default());
                return self.attach_argument(number, argument);
            }
            doc.lines.push(strip_indent(raw, doc.indent).to_string());
            return Ok(());
        }

        let line = raw.trim();

        if line.is_empty() {
            self.push_description("");
            return Ok(());
        }
        if line.starts_with('#') {
            return Ok(());
        }
        if line.starts_with('@') {
            self.pending_tags.extend(
                line.split_whitespace()
                    .filter(|tag| tag.starts_with('@'))
                    .map(String::from),
            );
            return Ok(());
        }

        if let Some(name) = strip_keyword(line, "Feature") {
            if self.feature.is_some() {
                bail!("Line {}: a file may only contain one Feature", number);
            }
            self.feature = Some(Feature {
                name: name.to_string(),
                tags: std::mem::take(&mut self.pending_tags),
                ..Feature::default()
            });
            self.enter(Section::Feature);
            return Ok(());
        }

        if self.feature.is_none() {
            bail!("Line {}: expected `Feature:` header, found `{}`", number, line);
        }

        if let Some(name) = strip_keyword(line, "Background") {
            self.flush_scenario();
            self.pending_tags.clear();
            self.current = Some(Scenario {
                keyword: "Background".to_string(),
                name: name.to_string(),
                ..Scenario::default()
            });
            self.is_background = true;
            self.enter(Section::Background);
            return Ok(());
        }

        if let Some((keyword, name)) = SCENARIO_KEYWORDS
            .iter()
            .find_map(|k| strip_keyword(line, k).map(|name| (*k, name)))
        {
            self.flush_scenario();
            self.current = Some(Scenario {
                keyword: keyword.to_string(),
                name: name.to_string(),
                tags: std::mem::take(&mut self.pending_tags),
                ..Scenario::default()
            });
            self.is_background = false;
            self.enter(Section::Scenario);
            return Ok(());
        }

        if let Some(name) = EXAMPLES_KEYWORDS
            .iter()
            .find_map(|k| strip_keyword(line, k))
        {
            let Some(scenario) = self.current.as_mut().filter(|_| !self.is_background) else {
                bail!("Line {}: Examples outside of a scenario", number);
            };
            self.pending_tags.clear();
            scenario.examples.push(Examples {
                name: name.to_string(),
                table: Table::default(),
            });
            self.enter(Section::Examples);
            return Ok(());
        }

        if let Some((keyword, text)) = split_step(line) {
            let Some(scenario) = self.current.as_mut() else {
                bail!("Line {}: step outside of a scenario: `{}`", number, line);
            };
            if self.section == Section::Examples {
                bail!("Line {}: step after Examples: `{}`", number, line);
            }
            scenario.steps.push(Step {
                keyword: keyword.to_string(),
                text: text.to_string(),
                argument: None,
            });
            return Ok(());
        }

        if line.starts_with('|') {
            return self.table_row(number, line);
        }

        if let Some(fence) = ["\"\"\"", "```"].into_iter().find(|f| line.starts_with(f)) {
            if !self.has_step() {
                bail!("Line {}: doc string without a step", number);
            }
            self.doc_string = Some(DocString {
                fence,
                indent: raw.len() - raw.trim_start().len(),
                lines: Vec::new(),
            });
            return Ok(());
        }

        if self.has_step() {
            bail!("Line {}: unexpected text after steps: `{}`", number, line);
        }
        self.push_description(raw);
        Ok(())
    }

    fn table_row(&mut self, number: usize, line: &str) -> Result<()> {
        let row = split_cells(line);

        if self.section == Section::Examples {
            if let Some(examples) = self
                .current
                .as_mut()
                .and_then(|scenario| scenario.examples.last_mut())
            {
                examples.table.rows.push(row);
                return Ok(());
            }
        }

        let Some(step) = self
            .current
            .as_mut()
            .and_then(|scenario| scenario.steps.last_mut())
        else {
            bail!("Line {}: table without a step", number);
        };

        match step.argument.as_mut() {
            Some(StepArgument::Table(table)) => table.rows.push(row),
            Some(StepArgument::DocString(_)) => {
                bail!("Line {}: step already has a doc string", number)
            }
            None => step.argument = Some(StepArgument::Table(Table { rows: vec![row] })),
        }
        Ok(())
    }

    fn attach_argument(&mut self, number: usize, argument: StepArgument) -> Result<()> {
        let Some(step) = self
            .current
            .as_mut()
            .and_then(|scenario| scenario.steps.last_mut())
        else {
            bail!("Line {}: doc string without a step", number);
        };
        step.argument = Some(argument);
        Ok(())
    }

    fn has_step(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|scenario| !scenario.steps.is_empty())
    }

    fn enter(&mut self, section: Section) {
        self.section = section;
        self.description_indent = None;
    }

    /// Appends a description line, keeping indentation relative to the
    /// section's first description line so nested markdown survives.
    fn push_description(&mut self, raw: &str) {
        let target = match self.section {
            Section::Feature => self.feature.as_mut().map(|f| &mut f.description),
            Section::Background | Section::Scenario => {
                self.current.as_mut().map(|s| &mut s.description)
            }
            Section::Preamble | Section::Examples => None,
        };

        if let Some(description) = target {
            let line = raw.trim_end();
            if line.is_empty() {
                if !description.is_empty() {
                    description.push('\n');
                }
                return;
            }
            let indent = line.len() - line.trim_start().len();
            let base = *self.description_indent.get_or_insert(indent);
            description.push_str(strip_indent(line, base));
            description.push('\n');
        }
    }

    fn flush_scenario(&mut self) {
        let Some(mut scenario) = self.current.take() else {
            return;
        };
        scenario.description = scenario.description.trim_end().to_string();

        if let Some(feature) = self.feature.as_mut() {
            if self.is_background {
                feature.background = Some(scenario);
            } else {
                feature.scenarios.push(scenario);
            }
        }
    }

    fn finish(mut self) -> Result<Feature> {
        if self.doc_string.is_some() {
            bail!("Unterminated doc string at end of file");
        }
        self.flush_scenario();

        let Some(mut feature) = self.feature else {
            bail!("No `Feature:` header found");
        };
        feature.description = feature.description.trim_end().to_string();
        Ok(feature)
    }
}

/// Returns the trimmed text after `Keyword:` when `line` starts with it.
fn strip_keyword<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    line.strip_prefix(keyword)?
        .strip_prefix(':')
        .map(str::trim)
}

fn split_step(line: &str) -> Option<(&str, &str)> {
    STEP_KEYWORDS.iter().find_map(|keyword| {
        let rest = line.strip_prefix(keyword)?;
        rest.starts_with(' ')
            .then(|| (*keyword, rest.trim()))
    })
}

/// Splits `| a | b |` into trimmed cells, honouring `\|` escapes.
fn split_cells(line: &str) -> Vec<String> {
    let inner = line.trim().trim_start_matches('|');
    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('|') => cell.push('|'),
                Some('n') => cell.push('\n'),
                Some(other) => {
                    cell.push('\\');
                    cell.push(other);
                }
                None => cell.push('\\'),
            },
            '|' => cells.push(std::mem::take(&mut cell).trim().to_string()),
            _ => cell.push(c),
        }
    }

    // Text after the final pipe is not a cell
    cells
}

/// Removes up to `indent` leading whitespace characters.
fn strip_indent(line: &str, indent: usize) -> &str {
    let skip = line
        .char_indices()
        .take(indent)
        .take_while(|(_, c)| c.is_whitespace())
        .last()
        .map(|(idx, c)| idx + c.len_utf8())
        .unwrap_or(0);
    &line[skip..]
}
