use chrono::{DateTime, Local};
use std::sync::mpsc;
use windows::core::{w, HSTRING};
use windows::Data::Xml::Dom::XmlDocument;
use windows::Foundation::DateTime as WinDateTime;
use windows::UI::Notifications::{
    ScheduledToastNotification, ToastNotification, ToastNotificationManager, ToastNotifier,
};
use windows::Win32::Foundation::HWND;
use windows::Win32::UI::Shell::{
    Shell_NotifyIconW, NIF_ICON, NIF_INFO, NIF_TIP, NIIF_INFO, NIM_ADD, NIM_DELETE,
    NOTIFYICONDATAW, NOTIFYICONDATAW_0,
};
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DestroyWindow, LoadIconW, HWND_MESSAGE, IDI_INFORMATION, WINDOW_EX_STYLE,
    WINDOW_STYLE,
};

use super::{BALLOON_DISPOSE_AFTER, BALLOON_TIMEOUT};

/// Unpackaged processes have no AppUserModelID of their own; toasts are
/// attributed to Windows PowerShell, which is registered on every install.
const APP_ID: &str = r"{1AC14E77-02E7-4E5D-B744-2EB1AE5198B7}\WindowsPowerShell\v1.0\powershell.exe";

/// Seconds between 1601-01-01 (FILETIME epoch) and 1970-01-01.
const FILETIME_UNIX_OFFSET: i64 = 11_644_473_600;

fn notifier() -> windows::core::Result<ToastNotifier> {
    ToastNotificationManager::CreateToastNotifierWithId(&HSTRING::from(APP_ID))
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

fn toast_xml(title: &str, body: &str) -> windows::core::Result<XmlDocument> {
    let xml = format!(
        r#"<toast><visual><binding template="ToastGeneric"><text>{}</text><text>{}</text></binding></visual></toast>"#,
        escape_xml(title),
        escape_xml(body)
    );
    let doc = XmlDocument::new()?;
    doc.LoadXml(&HSTRING::from(xml))?;
    Ok(doc)
}

/// 100ns ticks since 1601-01-01 UTC. Fails for times past the FILETIME range.
fn to_win_time(due: DateTime<Local>) -> anyhow::Result<WinDateTime> {
    let ticks = due
        .timestamp()
        .checked_add(FILETIME_UNIX_OFFSET)
        .and_then(|secs| secs.checked_mul(10_000_000))
        .and_then(|t| t.checked_add(i64::from(due.timestamp_subsec_nanos() / 100)))
        .ok_or_else(|| anyhow::anyhow!("due time {due} is out of range for a toast"))?;
    Ok(WinDateTime {
        UniversalTime: ticks,
    })
}

pub fn show_toast(title: &str, body: &str) -> anyhow::Result<()> {
    let toast = ToastNotification::CreateToastNotification(&toast_xml(title, body)?)?;
    notifier()?.Show(&toast)?;
    Ok(())
}

pub fn schedule_toast(due: DateTime<Local>, title: &str, body: &str) -> anyhow::Result<()> {
    let scheduled = ScheduledToastNotification::CreateScheduledToastNotification(
        &toast_xml(title, body)?,
        to_win_time(due)?,
    )?;
    notifier()?.AddToSchedule(&scheduled)?;
    Ok(())
}

/// Copy `text` into a NUL-terminated fixed buffer, truncating on a code
/// point boundary.
fn copy_wide(dst: &mut [u16], text: &str) {
    let Some(len) = dst.len().checked_sub(1) else {
        return;
    };
    let mut written = 0;
    for (slot, unit) in dst.iter_mut().take(len).zip(text.encode_utf16()) {
        *slot = unit;
        written += 1;
    }
    if written > 0 && (0xD800..=0xDBFF).contains(&dst[written - 1]) {
        written -= 1;
    }
    for slot in &mut dst[written..] {
        *slot = 0;
    }
}

fn add_balloon(title: &str, body: &str) -> anyhow::Result<NOTIFYICONDATAW> {
    unsafe {
        let hwnd: HWND = CreateWindowExW(
            WINDOW_EX_STYLE::default(),
            w!("STATIC"),
            w!("mail_launcher"),
            WINDOW_STYLE::default(),
            0,
            0,
            0,
            0,
            HWND_MESSAGE,
            None,
            None,
            None,
        )?;
        let mut data = NOTIFYICONDATAW {
            cbSize: std::mem::size_of::<NOTIFYICONDATAW>() as u32,
            hWnd: hwnd,
            uID: 1,
            uFlags: NIF_ICON | NIF_TIP | NIF_INFO,
            hIcon: LoadIconW(None, IDI_INFORMATION)?,
            dwInfoFlags: NIIF_INFO,
            Anonymous: NOTIFYICONDATAW_0 {
                uTimeout: BALLOON_TIMEOUT.as_millis() as u32,
            },
            ..Default::default()
        };
        copy_wide(&mut data.szTip, title);
        copy_wide(&mut data.szInfoTitle, title);
        copy_wide(&mut data.szInfo, body);
        if let Err(e) = Shell_NotifyIconW(NIM_ADD, &data).ok() {
            let _ = DestroyWindow(hwnd);
            return Err(e.into());
        }
        Ok(data)
    }
}

/// The icon is created on a detached thread that also removes it, since the
/// backing window must be destroyed by the thread that created it. If the
/// process exits first the OS reclaims the icon.
pub fn show_balloon(title: &str, body: &str) -> anyhow::Result<()> {
    let (tx, rx) = mpsc::channel();
    let title = title.to_string();
    let body = body.to_string();
    std::thread::spawn(move || {
        let icon = match add_balloon(&title, &body) {
            Ok(icon) => {
                let _ = tx.send(Ok(()));
                icon
            }
            Err(e) => {
                let _ = tx.send(Err(e));
                return;
            }
        };
        std::thread::sleep(BALLOON_DISPOSE_AFTER);
        unsafe {
            let _ = Shell_NotifyIconW(NIM_DELETE, &icon);
            let _ = DestroyWindow(icon.hWnd);
        }
    });
    rx.recv()
        .map_err(|_| anyhow::anyhow!("tray balloon thread exited early"))?
}
