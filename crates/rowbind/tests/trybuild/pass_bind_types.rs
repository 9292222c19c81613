use std::borrow::Cow;
use std::collections::{BTreeSet, LinkedList, VecDeque};

use rowbind::Null;
use rowbind::types::bstr::BString;

fn main() -> rowbind::Result<()> {
    let db = rowbind::open(":memory:")?;

    let _ = db.prepare(
        "SELECT ?, ?, ?, ?, ?, ?, ?, ?, ?, ?",
        (1_i8, 2_i16, 3_i32, 4_i64, 5_isize, 6_u16, 7_u32, 1.5_f32, 2.5_f64, Null),
    )?;
    let _ = db.prepare(
        "SELECT ?, ?, ?, ?, ?, ?, ?",
        (
            "text",
            String::from("text"),
            Cow::Borrowed("text"),
            &b"blob"[..],
            vec![0_u8, 1],
            [0_u8; 4],
            BString::from("blob"),
        ),
    )?;
    let _ = db.prepare("SELECT ?, ?, ?", (Some(1_i64), None::<String>, Some(vec![0_u8])))?;
    let _ = db.prepare(
        "SELECT ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?",
        (
            [1_i64, 2],
            vec![Some("a"), None],
            VecDeque::from([1.0_f64, 2.0]),
            LinkedList::from([Null, Null]),
            BTreeSet::from([3_u32, 4]),
            &[vec![0_u8], vec![1_u8]][..],
        ),
    )?;

    Ok(())
}
