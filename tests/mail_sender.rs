#![cfg(unix)]

use mail_launcher::plugins::mail::{Mail, MailSender, MAIL_SCRIPT_FILE};
use serial_test::serial;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn mail(recipients: &[&str]) -> Mail {
    Mail {
        recipients: recipients.iter().map(|r| r.to_string()).collect(),
        subject: "Notification 01/02/2024 start".into(),
        body: "Start \"now\"".into(),
    }
}

fn touch_script(dir: &Path) -> PathBuf {
    let script = dir.join(MAIL_SCRIPT_FILE);
    std::fs::write(&script, "# mail script").unwrap();
    script
}

/// Stand-in interpreter that records its arguments one per line.
fn recording_program(dir: &Path) -> PathBuf {
    let program = dir.join("fake_powershell.sh");
    std::fs::write(
        &program,
        "#!/bin/sh\nprintf '%s\\n' \"$@\" > \"$(dirname \"$0\")/args.txt\"\n",
    )
    .unwrap();
    std::fs::set_permissions(&program, std::fs::Permissions::from_mode(0o755)).unwrap();
    program
}

#[test]
#[serial]
fn zero_exit_is_success() {
    let dir = tempdir().unwrap();
    let sender = MailSender::new("true", touch_script(dir.path()));
    assert!(sender.send(&mail(&["a@x.org"])).is_ok());
}

#[test]
#[serial]
fn non_zero_exit_is_an_error() {
    let dir = tempdir().unwrap();
    let sender = MailSender::new("false", touch_script(dir.path()));
    let err = sender.send(&mail(&["a@x.org"])).unwrap_err();
    assert!(err.to_string().contains("exited"), "{err}");
}

#[test]
#[serial]
fn missing_script_is_an_error() {
    let dir = tempdir().unwrap();
    let sender = MailSender::colocated(dir.path());
    let err = sender.send(&mail(&[])).unwrap_err();
    assert!(err.to_string().contains(MAIL_SCRIPT_FILE));
}

#[test]
#[serial]
fn missing_program_is_an_error() {
    let dir = tempdir().unwrap();
    let sender = MailSender::new(dir.path().join("no-such-shell"), touch_script(dir.path()));
    assert!(sender.send(&mail(&["a@x.org"])).is_err());
}

#[test]
#[serial]
fn empty_recipients_still_invoke_script() {
    let dir = tempdir().unwrap();
    let script = touch_script(dir.path());
    let sender = MailSender::new(recording_program(dir.path()), &script);
    sender.send(&mail(&[])).unwrap();

    let args = std::fs::read_to_string(dir.path().join("args.txt")).unwrap();
    let args: Vec<&str> = args.lines().collect();
    assert_eq!(
        args,
        vec![
            "-NoProfile",
            "-ExecutionPolicy",
            "Bypass",
            "-File",
            script.to_str().unwrap(),
            "-To",
            "",
            "-Subject",
            "Notification 01/02/2024 start",
            "-Body",
            "Start \"now\"",
        ]
    );
}
