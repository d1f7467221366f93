//! Rules command - list the built-in classification rules.

use docprep::RuleSet;
use serde::Serialize;

/// Arguments for the rules command
#[derive(Debug)]
pub struct RulesArgs {
    pub json: bool,
}

#[derive(Serialize)]
struct RuleInfo<'a> {
    name: &'a str,
    pattern: &'a str,
    output: &'a str,
}

/// Execute the rules command
pub fn run(args: RulesArgs) -> anyhow::Result<()> {
    let rules = RuleSet::builtin()?;

    if args.json {
        let infos: Vec<RuleInfo<'_>> = rules
            .rules()
            .iter()
            .map(|rule| RuleInfo {
                name: rule.name(),
                pattern: rule.pattern_str(),
                output: rule.template_hint(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&infos)?);
        return Ok(());
    }

    println!("Built-in rules (first match wins):");
    println!();
    for (index, rule) in rules.rules().iter().enumerate() {
        println!("{:>2}. {:<17} {}", index + 1, rule.name(), rule.pattern_str());
        println!("    -> {}", rule.template_hint());
    }

    Ok(())
}
