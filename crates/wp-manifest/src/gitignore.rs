//! Merging the skeleton `.gitignore` into a project's existing one
//!
//! Rules are grouped under `# Heading` comment lines. Headings shared by the
//! template and the project file merge into one group; project rules that
//! appear before any heading land in "User rules", which is always written
//! last.

const USER_RULES: &str = "user rules";

#[derive(Debug)]
struct Group {
    name: String,
    rules: Vec<String>,
}

/// Merge `template` with the project's `existing` `.gitignore`.
///
/// Without an existing file the template is returned unchanged. Otherwise
/// duplicate rules are dropped (first occurrence wins), blank lines and the
/// original comments are replaced by regenerated headings, and each group is
/// sorted by rule length, then lexically.
pub fn merge_gitignore(template: &str, existing: Option<&str>) -> String {
    let Some(existing) = existing else {
        return template.to_string();
    };

    let combined = format!("{}\n# User rules\n{}", template, existing);

    let mut groups = vec![Group {
        name: USER_RULES.to_string(),
        rules: Vec::new(),
    }];
    let mut current = 0;
    let mut seen: Vec<&str> = Vec::new();

    for line in combined.lines() {
        let line = line.trim_end_matches('\r');
        if let Some(heading) = line.strip_prefix('#') {
            let name = heading.trim_start().to_lowercase();
            current = match groups.iter().position(|g| g.name == name) {
                Some(idx) => idx,
                None => {
                    groups.push(Group {
                        name,
                        rules: Vec::new(),
                    });
                    groups.len() - 1
                }
            };
        } else if !line.trim().is_empty() && !seen.contains(&line) {
            seen.push(line);
            groups[current].rules.push(line.to_string());
        }
    }

    let mut out = Vec::new();
    let mut user_rules = Vec::new();
    for mut group in groups {
        if group.name == USER_RULES {
            user_rules = group.rules;
            continue;
        }
        if group.rules.is_empty() {
            continue;
        }
        sort_rules(&mut group.rules);
        out.push(format!("# {}", capitalize(&group.name)));
        out.extend(group.rules);
        out.push(String::new());
    }

    sort_rules(&mut user_rules);
    out.push("# User rules".to_string());
    out.extend(user_rules);
    out.push(String::new());

    out.join("\n")
}

fn sort_rules(rules: &mut [String]) {
    rules.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_no_existing_file_returns_template() {
        let template = "# WordPress\n/public/wp\n";
        assert_eq!(merge_gitignore(template, None), template);
    }

    #[test]
    fn test_groups_merge_and_dedupe() {
        let template = "# Composer\n/vendor\n\n# WordPress\n/public/wp\n/public/uploads\n";
        let existing = "node_modules\n/vendor\n# wordpress\n/public/wp/wp-config.php\n.env\n";

        let merged = merge_gitignore(template, Some(existing));

        assert_eq!(
            merged,
            "# Composer\n/vendor\n\n# Wordpress\n.env\n/public/wp\n/public/uploads\n/public/wp/wp-config.php\n\n# User rules\nnode_modules\n"
        );
    }

    #[test]
    fn test_empty_groups_are_dropped() {
        let template = "# Empty\n\n# Composer\n/vendor\n";
        let merged = merge_gitignore(template, Some(""));
        assert_eq!(merged, "# Composer\n/vendor\n\n# User rules\n");
    }

    #[test]
    fn test_user_rules_sorted_by_length() {
        let merged = merge_gitignore("", Some("zz\n.idea\na\n.DS_Store\n"));
        assert_eq!(merged, "# User rules\na\nzz\n.idea\n.DS_Store\n");
    }
}
