use rowbind::types::bstr::BString;

fn main() -> rowbind::Result<()> {
    let db = rowbind::open(":memory:")?;

    let (a, b, c, d, e): (i64, f64, String, Vec<u8>, BString) =
        db.execute_returning_one_row("SELECT 1, 1.5, 'x', x'00', x'01'", ())?;
    assert_eq!((a, b, c.as_str(), d, e), (1, 1.5, "x", vec![0], BString::from(vec![1])));

    let row: (Option<i64>, Option<f64>, Option<String>, Option<Vec<u8>>, Option<BString>) =
        db.execute_returning_one_row("SELECT NULL, NULL, NULL, NULL, NULL", ())?;
    assert_eq!(row, (None, None, None, None, None));

    Ok(())
}
