//! Page footer data: last-updated time, contributors and the edit link.
//!
//! Each item is enabled by frontmatter, else by the theme, else by default.

use std::fmt::Write;

use chrono::{DateTime, Utc};
use docnav_config::ThemeLocaleConfig;
use docnav_config::theme::DEFAULT_LAST_UPDATED_FORMAT;

use crate::link::ResolvedLink;
use crate::page::{Contributor, Frontmatter, PageData};
use crate::path::{remove_leading_slash, remove_trailing_slash};

const DEFAULT_DOCS_BRANCH: &str = "main";
const EDIT_LINK_TEXT: &str = "Edit this page";

/// Formatted time of the page's last commit.
///
/// Times are rendered in UTC with the theme's `last_updated_format`.
pub fn last_updated(
    frontmatter: &Frontmatter,
    theme: &ThemeLocaleConfig,
    page: &PageData,
) -> Option<String> {
    let enabled = frontmatter.last_updated.or(theme.last_updated).unwrap_or(true);
    if !enabled {
        return None;
    }
    let millis = page.git.as_ref()?.updated_time.filter(|&t| t != 0)?;
    let time = DateTime::<Utc>::from_timestamp_millis(millis)?;
    let format = theme
        .last_updated_format
        .as_deref()
        .unwrap_or(DEFAULT_LAST_UPDATED_FORMAT);

    let mut formatted = String::new();
    if write!(formatted, "{}", time.format(format)).is_err() {
        tracing::warn!(format, "Invalid last_updated_format, last updated time hidden");
        return None;
    }
    Some(formatted)
}

/// Git contributors of the page.
pub fn contributors<'a>(
    frontmatter: &Frontmatter,
    theme: &ThemeLocaleConfig,
    page: &'a PageData,
) -> Option<&'a [Contributor]> {
    let enabled = frontmatter.contributors.or(theme.contributors).unwrap_or(true);
    if !enabled {
        return None;
    }
    page.git.as_ref()?.contributors.as_deref()
}

/// Repository hosts with a known edit URL layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RepoType {
    GitHub,
    GitLab,
    Gitee,
    Bitbucket,
}

impl RepoType {
    /// Detect the host of `repo`.
    ///
    /// Non-HTTP values are GitHub `owner/name` shorthands.
    pub fn detect(repo: &str) -> Option<Self> {
        if !is_http(repo) || repo.contains("github.com") {
            Some(Self::GitHub)
        } else if repo.contains("bitbucket.org") {
            Some(Self::Bitbucket)
        } else if repo.contains("gitlab.com") {
            Some(Self::GitLab)
        } else if repo.contains("gitee.com") {
            Some(Self::Gitee)
        } else {
            None
        }
    }

    /// Edit URL pattern with `:repo`, `:branch` and `:path` placeholders.
    pub fn edit_link_pattern(self) -> &'static str {
        match self {
            Self::GitHub | Self::Gitee => ":repo/edit/:branch/:path",
            Self::GitLab => ":repo/-/edit/:branch/:path",
            Self::Bitbucket => {
                ":repo/src/:branch/:path?mode=edit&spa=0&at=:branch&fileviewer=file-view-default"
            }
        }
    }
}

fn is_http(link: &str) -> bool {
    link.starts_with("http://") || link.starts_with("https://") || link.starts_with("//")
}

/// Link to the page source in its repository.
pub fn edit_link(
    frontmatter: &Frontmatter,
    theme: &ThemeLocaleConfig,
    page: &PageData,
) -> Option<ResolvedLink> {
    let enabled = frontmatter.edit_link.or(theme.edit_link).unwrap_or(true);
    if !enabled {
        return None;
    }
    let file_path = page.file_path_relative.as_deref()?;
    let repo = theme.docs_repo.as_deref().filter(|repo| !repo.is_empty())?;
    let pattern = match theme.edit_link_pattern.as_deref() {
        Some(pattern) if !pattern.is_empty() => pattern,
        _ => RepoType::detect(repo)?.edit_link_pattern(),
    };

    let repo_url = if is_http(repo) {
        repo.to_owned()
    } else {
        format!("https://github.com/{repo}")
    };
    let branch = theme.docs_branch.as_deref().unwrap_or(DEFAULT_DOCS_BRANCH);
    let docs_dir = theme.docs_dir.as_deref().unwrap_or("");
    let path = format!("{}/{file_path}", remove_trailing_slash(docs_dir));

    let link = pattern
        .replace(":repo", &repo_url)
        .replace(":branch", branch)
        .replace(":path", remove_leading_slash(&path));
    Some(ResolvedLink {
        text: EDIT_LINK_TEXT.to_owned(),
        link,
    })
}
