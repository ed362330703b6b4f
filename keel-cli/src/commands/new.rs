//! `keel new` - generate a project skeleton from an embedded template.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Template ids accepted by `--tpl`.
pub const VALID_TEMPLATES: &[&str] = &["standard-3tier"];

/// Relative path and contents for every file in the standard-3tier template.
/// The `{{project_name}}` marker is substituted at generation time.
const STANDARD_3TIER: &[(&str, &str)] = &[
    (
        "Cargo.toml",
        include_str!("../../templates/standard-3tier/Cargo.toml.tpl"),
    ),
    (
        "src/main.rs",
        include_str!("../../templates/standard-3tier/main.rs.tpl"),
    ),
    (
        "src/api.rs",
        include_str!("../../templates/standard-3tier/api.rs.tpl"),
    ),
    (
        "src/service.rs",
        include_str!("../../templates/standard-3tier/service.rs.tpl"),
    ),
    (
        "src/repository.rs",
        include_str!("../../templates/standard-3tier/repository.rs.tpl"),
    ),
    (
        "config/app.yaml",
        include_str!("../../templates/standard-3tier/app.yaml.tpl"),
    ),
    (
        "config/app.develop.yaml",
        include_str!("../../templates/standard-3tier/app.develop.yaml.tpl"),
    ),
    (
        "README.md",
        include_str!("../../templates/standard-3tier/README.md.tpl"),
    ),
    (".gitignore", include_str!("../../templates/standard-3tier/gitignore.tpl")),
];

#[derive(Debug, Clone)]
pub struct NewProjectConfig {
    pub project_name: String,
    pub template: String,
    pub output_dir: PathBuf,
    pub force: bool,
}

/// Generate a new project under `<output_dir>/<project_name>`.
///
/// Returns the path of the generated project root. Fails without touching
/// the filesystem when the template id is unknown or when the target
/// directory already has content and `force` is not set.
pub fn generate_project(config: &NewProjectConfig) -> Result<PathBuf> {
    let files = template_files(&config.template)?;

    let target = config.output_dir.join(&config.project_name);
    if is_non_empty_dir(&target) && !config.force {
        bail!(
            "target directory {} is not empty (pass --force to overwrite)",
            target.display()
        );
    }

    let mut files_created = 0usize;
    for (relative, template) in files {
        let path = target.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let rendered = render(template, &config.project_name);
        fs::write(&path, rendered)
            .with_context(|| format!("failed to write {}", path.display()))?;
        files_created += 1;
    }

    info!(
        project = %config.project_name,
        template = %config.template,
        files_created,
        path = %target.display(),
        "project generated"
    );
    Ok(target)
}

fn template_files(template: &str) -> Result<&'static [(&'static str, &'static str)]> {
    match template {
        "standard-3tier" => Ok(STANDARD_3TIER),
        other => bail!(
            "unknown template id '{other}' (valid templates: {})",
            VALID_TEMPLATES.join(", ")
        ),
    }
}

fn render(template: &str, project_name: &str) -> String {
    template.replace("{{project_name}}", project_name)
}

fn is_non_empty_dir(path: &Path) -> bool {
    match fs::read_dir(path) {
        Ok(mut entries) => entries.next().is_some(),
        Err(_) => false,
    }
}
