use mail_launcher::plugin::{Plugin, PluginContext, Theme};
use mail_launcher::plugins::mail::{
    parse_command, MailCommand, MailPlugin, DARK_ICON, LIGHT_ICON,
};
use std::time::Duration;
use tempfile::tempdir;

fn plugin() -> (tempfile::TempDir, MailPlugin) {
    let dir = tempdir().unwrap();
    let plugin = MailPlugin::new(dir.path());
    (dir, plugin)
}

#[test]
fn plain_text_is_copied_untrimmed() {
    let (_dir, plugin) = plugin();
    for query in ["hello world", "  padded  ", "", "mail", "mail   ", "email start"] {
        let results = plugin.search(query);
        assert_eq!(results.len(), 1, "query {query:?}");
        assert_eq!(results[0].action, format!("clipboard:{query}"));
        assert_eq!(results[0].context.as_deref(), Some(query));
        assert_eq!(results[0].label, format!("Title: {query}"));
    }
}

#[test]
fn unknown_sub_command_falls_through() {
    let (_dir, plugin) = plugin();
    let results = plugin.search("mail restart now");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].action, "clipboard:mail restart now");
}

#[test]
fn start_with_timer() {
    let (_dir, plugin) = plugin();
    let results = plugin.search("MAIL Start 8h");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].label, "Send start mail");
    assert_eq!(
        results[0].desc,
        "Send start notification via Outlook (timer 08:00:00)"
    );
    assert_eq!(results[0].action, "mail:start:8h");
    assert!(results[0].context.is_none());
}

#[test]
fn start_with_bad_timer_omits_it() {
    let (_dir, plugin) = plugin();
    let results = plugin.search("mail start notanumber");
    assert_eq!(results[0].desc, "Send start notification via Outlook");
    assert_eq!(results[0].action, "mail:start");
}

#[test]
fn stop_keeps_token() {
    let (_dir, plugin) = plugin();
    let results = plugin.search("mail stop 8h");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].label, "Send stop mail");
    assert_eq!(results[0].action, "mail:stop:8h");

    let results = plugin.search("mail stop");
    assert_eq!(results[0].action, "mail:stop");
}

#[test]
fn parses_timer_forms() {
    let timer = |q: &str| match parse_command(q) {
        MailCommand::Start { timer, .. } => timer,
        other => panic!("unexpected {other:?}"),
    };
    assert_eq!(timer("mail start 8h"), Some(Duration::from_secs(8 * 3600)));
    assert_eq!(timer("mail start 00:35"), Some(Duration::from_secs(35 * 60)));
    assert_eq!(timer("mail start 8"), Some(Duration::from_secs(8 * 3600)));
    assert_eq!(timer("mail start notanumber"), None);
    assert_eq!(timer("mail start"), None);
}

#[test]
fn parse_command_variants() {
    assert_eq!(parse_command("mail"), MailCommand::None);
    assert_eq!(parse_command("note start"), MailCommand::None);
    assert_eq!(
        parse_command("  mail   stop   late "),
        MailCommand::Stop {
            token: Some("late".into())
        }
    );
}

#[test]
fn icon_follows_theme() {
    let (_dir, plugin) = plugin();
    assert_eq!(plugin.search("x")[0].icon.as_deref(), Some(DARK_ICON));

    plugin.init(&PluginContext {
        theme: Theme::Light,
    });
    assert_eq!(plugin.search("x")[0].icon.as_deref(), Some(LIGHT_ICON));

    plugin.on_theme_changed(Theme::Light, Theme::HighContrastBlack);
    assert_eq!(plugin.search("mail start")[0].icon.as_deref(), Some(DARK_ICON));

    plugin.on_theme_changed(Theme::HighContrastBlack, Theme::HighContrastWhite);
    assert_eq!(plugin.search("mail stop")[0].icon.as_deref(), Some(LIGHT_ICON));
}

#[test]
fn context_menu_copies_context() {
    let (_dir, plugin) = plugin();
    let result = plugin.search(" some text").remove(0);
    let entries = plugin.context_menu(&result);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].label, "Copy to clipboard (Ctrl+C)");
    assert_eq!(entries[0].accelerator.as_deref(), Some("Ctrl+C"));
    assert_eq!(entries[0].action.action, "clipboard: some text");

    let mail = plugin.search("mail start").remove(0);
    assert!(plugin.context_menu(&mail).is_empty());
}
