//! Validator families: discovery → extraction → validation → run.
//!
//! Each family is independently invocable and returns a fresh
//! [`ValidationRun`]. One plugin's or file's failure never stops the others.

use std::fmt;

use tracing::debug;

use crate::config::{Config, MANIFEST_FILE, MARKETPLACE_FILE};
use crate::discovery::{discover_plugins, markdown_files, relative_label, skill_dirs, Plugin};
use crate::errors::Result;
use crate::issue::{Diagnostic, Kind, L001};
use crate::plugin::skill::SKILL_FILE;
use crate::plugin::{
    validate_agent, validate_command, validate_hooks, validate_manifest, validate_marketplace,
    validate_rule, validate_skill, validate_skill_dir_name,
};
use crate::resolver::find_broken_symlinks;
use crate::run::ValidationRun;

/// One independently invocable group of checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Manifest,
    Agents,
    Commands,
    Rules,
    Skills,
    Hooks,
    Symlinks,
    Marketplace,
}

impl Family {
    /// Every family, in the order the full suite runs them.
    pub const ALL: [Family; 8] = [
        Family::Manifest,
        Family::Agents,
        Family::Commands,
        Family::Rules,
        Family::Skills,
        Family::Hooks,
        Family::Symlinks,
        Family::Marketplace,
    ];

    /// Component kind this family examines and reports against.
    #[must_use]
    pub fn kind(self) -> Kind {
        match self {
            Family::Manifest => Kind::Manifest,
            Family::Agents => Kind::Agent,
            Family::Commands => Kind::Command,
            Family::Rules => Kind::Rule,
            Family::Skills => Kind::Skill,
            Family::Hooks => Kind::Hooks,
            Family::Symlinks => Kind::Symlink,
            Family::Marketplace => Kind::Marketplace,
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind().label())
    }
}

/// Run one family over the repository described by `config`.
///
/// Fails only when the plugins directory cannot be enumerated.
pub fn run(family: Family, config: &Config) -> Result<ValidationRun> {
    let plugins = discover_plugins(config)?;
    let mut run = ValidationRun::new();
    debug!(%family, plugins = plugins.len(), "starting validation");

    if family == Family::Marketplace {
        for _ in &plugins {
            run.plugin_scanned();
        }
        check_marketplace(config, &mut run);
        return Ok(run);
    }

    for plugin in &plugins {
        run.plugin_scanned();
        match family {
            Family::Manifest => check_manifest(plugin, &mut run),
            Family::Agents => check_agents(plugin, &mut run),
            Family::Commands => check_commands(plugin, &mut run),
            Family::Rules => check_rules(plugin, &mut run),
            Family::Skills => check_skills(plugin, &mut run),
            Family::Hooks => check_hooks(plugin, &mut run),
            Family::Symlinks => check_symlinks(plugin, &mut run),
            Family::Marketplace => {}
        }
    }
    Ok(run)
}

/// Run every family in sequence. The suite fails if any run has issues.
pub fn run_all(config: &Config) -> Result<Vec<(Family, ValidationRun)>> {
    Family::ALL
        .iter()
        .map(|&family| Ok((family, run(family, config)?)))
        .collect()
}

fn check_manifest(plugin: &Plugin, run: &mut ValidationRun) {
    run.examined(Kind::Manifest);
    run.report(
        &plugin.name,
        Kind::Manifest,
        MANIFEST_FILE,
        validate_manifest(plugin),
    );
}

fn check_agents(plugin: &Plugin, run: &mut ValidationRun) {
    let dir = plugin.agents_dir();
    for path in markdown_files(&dir, false) {
        debug!(plugin = %plugin.name, file = %path.display(), "validating agent");
        run.examined(Kind::Agent);
        run.report(
            &plugin.name,
            Kind::Agent,
            &relative_label(&dir, &path),
            validate_agent(&path),
        );
    }
}

fn check_commands(plugin: &Plugin, run: &mut ValidationRun) {
    let dir = plugin.commands_dir();
    for path in markdown_files(&dir, true) {
        run.examined(Kind::Command);
        run.report(
            &plugin.name,
            Kind::Command,
            &relative_label(&dir, &path),
            validate_command(&path),
        );
    }
}

fn check_rules(plugin: &Plugin, run: &mut ValidationRun) {
    let dir = plugin.rules_dir();
    for path in markdown_files(&dir, true) {
        run.examined(Kind::Rule);
        run.report(
            &plugin.name,
            Kind::Rule,
            &relative_label(&dir, &path),
            validate_rule(&path),
        );
    }
}

fn check_skills(plugin: &Plugin, run: &mut ValidationRun) {
    let root = plugin.skills_dir();
    for dir in skill_dirs(&root) {
        debug!(plugin = %plugin.name, skill = %dir.display(), "validating skill");
        run.examined(Kind::Skill);
        let label = relative_label(&root, &dir);
        run.report(&plugin.name, Kind::Skill, &label, validate_skill_dir_name(&dir));
        run.report(
            &plugin.name,
            Kind::Skill,
            &format!("{label}/{SKILL_FILE}"),
            validate_skill(&dir),
        );
    }
}

fn check_hooks(plugin: &Plugin, run: &mut ValidationRun) {
    let path = plugin.hooks_path();
    if !path.is_file() {
        return;
    }
    let report = validate_hooks(&path);
    run.examined_many(Kind::Hooks, report.matchers);
    run.report(
        &plugin.name,
        Kind::Hooks,
        &relative_label(&plugin.hooks_dir(), &path),
        report.diagnostics,
    );
}

fn check_symlinks(plugin: &Plugin, run: &mut ValidationRun) {
    for dir in plugin.component_dirs() {
        let (broken, seen) = find_broken_symlinks(&dir);
        run.examined_many(Kind::Symlink, seen);
        for link in broken {
            let name = link
                .link
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let diagnostic = Diagnostic::referential(
                L001,
                format!(
                    "broken symlink \"{name}\" -> \"{}\"",
                    link.target.display()
                ),
            );
            run.report(
                &plugin.name,
                Kind::Symlink,
                &relative_label(&plugin.root, &link.link),
                [diagnostic],
            );
        }
    }
}

fn check_marketplace(config: &Config, run: &mut ValidationRun) {
    let report = validate_marketplace(&config.marketplace_path(), config.root());
    run.examined_many(Kind::Marketplace, report.entries);
    for finding in report.findings {
        let owner = finding.entry.as_deref().unwrap_or("marketplace");
        run.report(owner, Kind::Marketplace, MARKETPLACE_FILE, [finding.diagnostic]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn repo() -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("plugins")).unwrap();
        dir
    }

    #[test]
    fn missing_plugins_dir_fails_the_family() {
        let dir = tempdir().unwrap();
        assert!(run(Family::Agents, &Config::new(dir.path())).is_err());
    }

    #[test]
    fn agent_issues_are_located() {
        let dir = repo();
        write(dir.path(), "plugins/foo/agents/good.md", "---\nmodel: opus\ntools: Read\n---\n");
        write(dir.path(), "plugins/foo/agents/bad.md", "no header\n");
        let run = run(Family::Agents, &Config::new(dir.path())).unwrap();
        assert_eq!(run.examined_count(Kind::Agent), 2);
        assert_eq!(run.issues().len(), 1);
        assert_eq!(run.issues()[0].location(), "foo/agents/bad.md");
    }

    #[test]
    fn nested_commands_are_found() {
        let dir = repo();
        write(dir.path(), "plugins/foo/commands/top.md", "Do it.\n");
        write(dir.path(), "plugins/foo/commands/group/sub.md", "   \n");
        let run = run(Family::Commands, &Config::new(dir.path())).unwrap();
        assert_eq!(run.examined_count(Kind::Command), 2);
        assert_eq!(run.issues()[0].location(), "foo/commands/group/sub.md");
    }

    #[test]
    fn skill_dir_and_file_issues_have_separate_locations() {
        let dir = repo();
        write(
            dir.path(),
            "plugins/foo/skills/My Skill/SKILL.md",
            "---\nname: my-skill\ndescription: Use when testing.\n---\n",
        );
        let run = run(Family::Skills, &Config::new(dir.path())).unwrap();
        let locations: Vec<_> = run.issues().iter().map(|i| i.location()).collect();
        assert_eq!(
            locations,
            vec!["foo/skills/My Skill", "foo/skills/My Skill/SKILL.md"]
        );
    }

    #[test]
    fn hooks_count_matchers() {
        let dir = repo();
        write(
            dir.path(),
            "plugins/foo/hooks/hooks.json",
            r#"{"Stop": [{"matcher": "*", "hooks": [{"type": "command", "command": "x"}]},
                        {"matcher": "", "hooks": []}]}"#,
        );
        let run = run(Family::Hooks, &Config::new(dir.path())).unwrap();
        assert_eq!(run.examined_count(Kind::Hooks), 2);
        assert_eq!(run.issues().len(), 1);
    }

    #[test]
    fn plugin_without_components_is_clean() {
        let dir = repo();
        fs::create_dir_all(dir.path().join("plugins/empty")).unwrap();
        for family in Family::ALL {
            if family == Family::Manifest {
                continue;
            }
            let run = run(family, &Config::new(dir.path())).unwrap();
            assert!(run.is_clean(), "{family} should be clean");
            assert_eq!(run.plugin_count(), 1);
        }
    }

    #[test]
    fn run_all_covers_every_family() {
        let dir = repo();
        let runs = run_all(&Config::new(dir.path())).unwrap();
        assert_eq!(runs.len(), Family::ALL.len());
    }
}
