use logcabinet::cabinet::LogCabinet;
use logcabinet::error::ErrorKind;
use logcabinet::sheet::{LogSheet, SheetContents};
use logcabinet::store::CabinetStore;
use std::fmt::Write as _;
use std::fs;
use std::sync::{Arc, Mutex};
use std::thread;
use tempfile::TempDir;

fn snapshot(dir: &std::path::Path) -> Vec<(String, Vec<u8>)> {
    let mut files: Vec<_> = fs::read_dir(dir)
        .unwrap()
        .map(|e| {
            let e = e.unwrap();
            (
                e.file_name().to_string_lossy().into_owned(),
                fs::read(e.path()).unwrap(),
            )
        })
        .collect();
    files.sort();
    files
}

#[test]
fn nth_write_carries_number_n() {
    let temp = TempDir::new().unwrap();
    let mut cabinet = LogCabinet::create("cab1", "numbering", temp.path()).unwrap();
    let mut sheet = cabinet.new_log_sheet("sheet1", "desc").unwrap();

    for n in 1..=100u32 {
        assert_eq!(sheet.current_entry_number(), n);
        sheet.write(&format!("payload {}", n)).unwrap();
        assert_eq!(sheet.current_entry_number(), n + 1);
    }

    let contents = SheetContents::load(sheet.path()).unwrap();
    assert_eq!(contents.entries.len(), 100);
    for (i, entry) in contents.entries.iter().enumerate() {
        assert_eq!(entry.number, i as u32 + 1);
        assert_eq!(entry.text, format!("payload {}", i + 1));
    }
}

#[test]
fn new_entry_equals_write_then_reset() {
    let temp = TempDir::new().unwrap();
    let mut cabinet = LogCabinet::create("cab1", "", temp.path()).unwrap();

    let mut staged = cabinet.new_log_sheet("staged", "d").unwrap();
    write!(staged, "a").unwrap();
    staged.append("bc");
    staged.new_entry().unwrap();

    let mut direct = cabinet.new_log_sheet("direct", "d").unwrap();
    direct.append("abc");
    let text = direct.current_entry().to_string();
    direct.write(&text).unwrap();
    direct.reset_current_entry();

    assert_eq!(staged.current_entry(), "");
    assert_eq!(direct.current_entry(), "");
    assert_eq!(staged.current_entry_number(), direct.current_entry_number());
    assert_eq!(
        fs::read(staged.path()).unwrap(),
        fs::read(direct.path()).unwrap()
    );
    assert_eq!(fs::read_to_string(staged.path()).unwrap(), "d\n1 abc\n");
}

#[test]
fn create_over_existing_cabinet_is_byte_for_byte_untouched() {
    let temp = TempDir::new().unwrap();
    {
        let mut cabinet = LogCabinet::create("cab1", "original", temp.path()).unwrap();
        let mut sheet = cabinet.new_log_sheet("sheet1", "s").unwrap();
        sheet.write("entry").unwrap();
    }
    let dir = temp.path().join("cab1");
    let before = snapshot(&dir);

    let err = LogCabinet::create("cab1", "impostor", temp.path()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyExists);
    assert_eq!(snapshot(&dir), before);

    let err = LogSheet::create("sheet1", "impostor", &dir).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyExists);
    assert_eq!(snapshot(&dir), before);
}

#[test]
fn open_missing_cabinet_mutates_nothing() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("unrelated"), "x").unwrap();
    let before = snapshot(temp.path());

    let err = LogCabinet::open("cab1", temp.path()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DoesNotExist);
    assert_eq!(snapshot(temp.path()), before);
}

#[test]
fn reopen_yields_same_metadata() {
    let temp = TempDir::new().unwrap();
    let created = LogCabinet::create("cab1", "test cabinet", temp.path()).unwrap();
    let (name, description, count) = (
        created.name().to_string(),
        created.description().to_string(),
        created.count(),
    );
    drop(created);

    let reopened = LogCabinet::open("cab1", temp.path()).unwrap();
    assert_eq!(reopened.name(), name);
    assert_eq!(reopened.description(), description);
    assert_eq!(reopened.count(), count);
    assert_eq!(reopened.count(), 0);
}

#[test]
fn three_sheets_then_duplicate() {
    let temp = TempDir::new().unwrap();
    let mut cabinet = LogCabinet::create("cab1", "", temp.path()).unwrap();

    for name in ["sheet1", "sheet2", "sheet3"] {
        cabinet.new_log_sheet(name, "desc").unwrap();
    }
    assert_eq!(cabinet.count(), 3);
    for name in ["sheet1", "sheet2", "sheet3"] {
        assert!(cabinet.canonical_name(name).is_file());
    }

    let err = cabinet.new_log_sheet("sheet2", "again").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyExists);
    assert_eq!(cabinet.count(), 3);
    assert_eq!(
        fs::read_to_string(cabinet.canonical_name("sheet2")).unwrap(),
        "desc\n"
    );
}

#[test]
fn remove_then_open_fails() {
    let temp = TempDir::new().unwrap();
    {
        let mut cabinet = LogCabinet::create("cab1", "", temp.path()).unwrap();
        cabinet.new_log_sheet("a", "").unwrap();
        cabinet.new_log_sheet("b", "").unwrap();
    }

    LogCabinet::remove("cab1", temp.path()).unwrap();
    assert!(!temp.path().join("cab1").exists());
    assert_eq!(
        LogCabinet::open("cab1", temp.path()).unwrap_err().kind(),
        ErrorKind::DoesNotExist
    );
}

#[test]
fn sheets_can_be_written_from_their_own_threads() {
    let temp = TempDir::new().unwrap();
    let mut cabinet = LogCabinet::create("cab1", "", temp.path()).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let mut sheet = cabinet.new_log_sheet(&format!("worker{}", i), "w").unwrap();
            thread::spawn(move || {
                for n in 0..50 {
                    sheet.write(&format!("tick {}", n)).unwrap();
                }
                sheet.current_entry_number()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 51);
    }
    assert_eq!(cabinet.count(), 4);
}

#[test]
fn shared_sheet_behind_mutex_stays_gapless() {
    let temp = TempDir::new().unwrap();
    let sheet = LogSheet::create("shared", "shared sheet", temp.path()).unwrap();
    let path = sheet.path().to_path_buf();
    let sheet = Arc::new(Mutex::new(sheet));

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let sheet = Arc::clone(&sheet);
            thread::spawn(move || {
                for n in 0..25 {
                    sheet.lock().unwrap().write(&format!("t{} n{}", t, n)).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let contents = SheetContents::load(&path).unwrap();
    let numbers: Vec<u32> = contents.entries.iter().map(|e| e.number).collect();
    assert_eq!(numbers, (1..=100).collect::<Vec<u32>>());
}
