//! CLI command execution.

use std::fs;
use std::io::Read;
use std::time::Duration;

use crate::analysis::StandardLanguageAnalyzer;
use crate::cli::args::{Command, ExpandArgs, FilterArgs, GlossaArgs};
use crate::error::Result;
use crate::expand::{ExpansionConfig, QueryExpansionBuilder};
use crate::filter::{StemFilterEngine, stem_filters_from_json};
use crate::metadata;
use crate::query::QueryNode;
use crate::translate::{HttpTranslator, HttpTranslatorConfig};

/// Execute the parsed command.
pub fn execute_command(args: GlossaArgs) -> Result<()> {
    match args.command.clone() {
        Command::Expand(expand_args) => execute_expand(&args, &expand_args),
        Command::Filter(filter_args) => execute_filter(&args, &filter_args),
    }
}

fn execute_expand(args: &GlossaArgs, expand: &ExpandArgs) -> Result<()> {
    let translator = HttpTranslator::new(HttpTranslatorConfig {
        base_url: expand.translator_url.clone(),
        timeout: Duration::from_secs(expand.timeout),
    })?;
    let analyzer = StandardLanguageAnalyzer::new();
    let config = ExpansionConfig {
        include_synonyms: expand.synonyms,
        ..ExpansionConfig::default()
    };
    let builder = QueryExpansionBuilder::new(&translator, &analyzer, config);

    let clause = QueryNode::word_in(&expand.field, &expand.query);
    let root = match &expand.language {
        Some(code) => QueryNode::And(vec![clause, QueryNode::language_filter(code)]),
        None => clause,
    };

    let expanded = builder.expand(root)?;
    print_json(
        args,
        &serde_json::json!({
            "tree": expanded.root,
            (metadata::QUERY_METADATA): metadata::render_query_metadata(&expanded.translations)?,
        }),
    )
}

fn execute_filter(args: &GlossaArgs, filter: &FilterArgs) -> Result<()> {
    let tree_json = if filter.tree == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(&filter.tree)?
    };
    let tree: QueryNode = serde_json::from_str(&tree_json)?;

    let filters = stem_filters_from_json(Some(&filter.filters));
    let filtered = StemFilterEngine::new().filter(tree, &filters);

    print_json(args, &serde_json::to_value(&filtered)?)
}

fn print_json(args: &GlossaArgs, value: &serde_json::Value) -> Result<()> {
    let output = if args.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{output}");
    Ok(())
}
