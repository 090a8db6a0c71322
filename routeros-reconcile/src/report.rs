use colored::Colorize;
use routeros_diff_core::{format_summary, format_text, Script};

/// Render a script in pretty form for terminal output.
pub fn render_script(script: &Script) -> String {
    let raw = format_text(script);
    let mut out = Vec::new();

    for line in raw.lines() {
        let colored = if line.starts_with('/') {
            line.cyan().bold().to_string()
        } else if line.starts_with("add ") {
            line.green().to_string()
        } else if line.starts_with("remove ") {
            line.red().to_string()
        } else if line.starts_with("move ") {
            line.yellow().to_string()
        } else if line.starts_with("set ") {
            line.magenta().to_string()
        } else {
            line.to_string()
        };
        out.push(colored);
    }

    out.join("\n")
}

/// Render summary counts for terminal output.
pub fn render_summary(script: &Script) -> String {
    format_summary(script).cyan().to_string()
}

#[cfg(test)]
mod tests {
    use routeros_diff_core::{diff, parse};

    use super::*;

    #[test]
    fn colored_output_keeps_command_text() {
        colored::control::set_override(false);
        let base = parse("/ip firewall filter\nadd chain=a\nadd chain=b\n").expect("parse");
        let target = parse("/ip firewall filter\nadd chain=b\nadd chain=c\n").expect("parse");
        let script = diff(&base, &target).expect("diff");

        assert_eq!(
            render_script(&script),
            "/ip firewall filter\nremove 0\nadd chain=c"
        );
        assert_eq!(
            render_summary(&script),
            "sections=1 add=1 remove=1 move=0 set=0"
        );
    }
}
