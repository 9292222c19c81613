use libsqlite3_sys::{
    SQLITE_BUSY, SQLITE_CANTOPEN, SQLITE_ERROR, SQLITE_MISMATCH, SQLITE_MISUSE, SQLITE_NOMEM,
    SQLITE_OPEN_CREATE, SQLITE_OPEN_READWRITE, SQLITE_RANGE, SQLITE_ROW,
};
use rowbind::{ErrorKind, Null, OpenMode, Rowbind, SqliteDataType};
use rowbind_test::{Call, MockEngine, MockValue, open_mock};

#[test]
fn it_binds_left_to_right_expanding_ranges() -> anyhow::Result<()> {
    let engine = MockEngine::new();
    let db = open_mock(&engine)?;

    let _stmt = db.prepare("SELECT ?, ?, ?, ?, ?", (42, [1, 2, 3], "x"))?;

    assert_eq!(
        engine.binds(),
        vec![
            Call::BindInt64(1, 42),
            Call::BindInt64(2, 1),
            Call::BindInt64(3, 2),
            Call::BindInt64(4, 3),
            Call::BindText(5, "x".into()),
        ]
    );

    Ok(())
}

#[test]
fn it_binds_each_classification_with_its_primitive() -> anyhow::Result<()> {
    let engine = MockEngine::new();
    let db = open_mock(&engine)?;

    let _stmt = db.prepare(
        "SELECT ?, ?, ?, ?, ?, ?, ?, ?",
        (
            Null,
            None::<i64>,
            Some(2.5),
            String::from("text"),
            &b"\x42\x43"[..],
            vec![Some(7_i32), None],
            -1_i8,
        ),
    )?;

    assert_eq!(
        engine.binds(),
        vec![
            Call::BindNull(1),
            Call::BindNull(2),
            Call::BindDouble(3, 2.5),
            Call::BindText(4, "text".into()),
            Call::BindBlob(5, vec![0x42, 0x43]),
            Call::BindInt64(6, 7),
            Call::BindNull(7),
            Call::BindInt64(8, -1),
        ]
    );

    Ok(())
}

#[test]
fn it_binds_nothing_for_empty_parameter_lists() -> anyhow::Result<()> {
    let engine = MockEngine::new();
    let db = open_mock(&engine)?;

    let _stmt = db.prepare("SELECT 1", ())?;
    let _stmt = db.prepare("SELECT 1", (Vec::<i64>::new(),))?;

    assert!(engine.binds().is_empty());

    Ok(())
}

#[test]
fn it_reports_bind_failures_and_finalizes() -> anyhow::Result<()> {
    let engine = MockEngine::new()
        .fail_bind_at(2, SQLITE_RANGE)
        .with_errmsg("column index out of range");
    let db = open_mock(&engine)?;

    let err = db.prepare("SELECT ?, ?", (1, "two")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Bind);
    assert_eq!(err.context(), "failed to bind string to index 2");
    assert_eq!(err.code(), SQLITE_RANGE);
    assert_eq!(err.sql(), Some("SELECT ?, ?"));
    assert_eq!(err.site().operation(), "prepare_and_bind");
    assert!(err.to_string().starts_with(
        "failed to bind string to index 2, failed with: column index out of range \
         column index out of range for SQL \"SELECT ?, ?\" in "
    ));

    drop(db);
    assert_eq!(
        engine.calls(),
        vec![
            Call::Open {
                filename: "mock.db".into(),
                flags: SQLITE_OPEN_READWRITE | SQLITE_OPEN_CREATE,
            },
            Call::ExtendedResultCodes(true),
            Call::Prepare("SELECT ?, ?".into()),
            Call::BindInt64(1, 1),
            Call::BindText(2, "two".into()),
            Call::Finalize,
            Call::Close,
        ]
    );

    Ok(())
}

#[test]
fn it_stops_a_range_at_the_failing_element() -> anyhow::Result<()> {
    let engine = MockEngine::new().fail_bind_at(3, SQLITE_MISUSE);
    let db = open_mock(&engine)?;

    let err = db.prepare("SELECT ?, ?, ?, ?", ([1.0, 2.0, 3.0, 4.0],)).unwrap_err();
    assert_eq!(err.context(), "failed to bind double to index 3");
    assert_eq!(engine.binds().len(), 3);

    Ok(())
}

#[test]
fn it_opens_with_the_requested_mode() -> anyhow::Result<()> {
    let engine = MockEngine::new();
    let db = Rowbind::new()
        .filename("existing.db")
        .mode(OpenMode::OpenOnly)
        .open_with(engine.clone())?;
    assert_eq!(db.filename(), "existing.db");

    assert_eq!(
        engine.calls()[0],
        Call::Open {
            filename: "existing.db".into(),
            flags: SQLITE_OPEN_READWRITE,
        }
    );

    Ok(())
}

#[test]
fn it_closes_the_handle_of_a_failed_open() {
    let engine = MockEngine::new()
        .fail_open(SQLITE_CANTOPEN, true)
        .with_errmsg("unable to open database file");

    let err = open_mock(&engine).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Connection);
    assert_eq!(err.context(), "failed to open database \"mock.db\"");
    assert_eq!(err.engine_message(), Some("unable to open database file"));
    assert_eq!(engine.count(&Call::Close), 1);
}

#[test]
fn it_reports_a_failed_open_without_handle() {
    let engine = MockEngine::new().fail_open(SQLITE_NOMEM, false);

    let err = open_mock(&engine).unwrap_err();
    assert_eq!(err.code(), SQLITE_NOMEM);
    assert_eq!(err.engine_message(), None);
    assert_eq!(engine.count(&Call::Close), 0);
}

#[test]
fn it_rejects_a_successful_open_without_handle() {
    let engine = MockEngine::new().open_without_handle();

    let err = open_mock(&engine).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Connection);
    assert_eq!(err.code(), SQLITE_ERROR);
    assert_eq!(
        err.context(),
        "open returned no handle for database \"mock.db\""
    );
}

#[test]
fn it_ignores_extended_result_code_failures() -> anyhow::Result<()> {
    let engine = MockEngine::new().fail_extended_result_codes(SQLITE_MISUSE);
    open_mock(&engine)?;
    Ok(())
}

#[test]
fn it_reports_prepare_failures() -> anyhow::Result<()> {
    let engine = MockEngine::new()
        .fail_prepare(SQLITE_ERROR)
        .with_errmsg("near \"SELEC\": syntax error");
    let db = open_mock(&engine)?;

    let err = db.prepare("SELEC 1", (1,)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Prepare);
    assert!(err.to_string().starts_with(
        "failed to create prepared statement \"SELEC 1\", failed with: \
         near \"SELEC\": syntax error SQL logic error in "
    ));
    assert!(engine.binds().is_empty());
    assert_eq!(engine.count(&Call::Finalize), 0);

    Ok(())
}

#[test]
fn it_rejects_a_successful_prepare_without_statement() -> anyhow::Result<()> {
    let engine = MockEngine::new().prepare_without_handle();
    let db = open_mock(&engine)?;

    let err = db.prepare("", ()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Prepare);
    assert_eq!(err.code(), SQLITE_ERROR);

    Ok(())
}

#[test]
fn it_reports_step_failures() -> anyhow::Result<()> {
    let engine = MockEngine::new()
        .script_steps([SQLITE_BUSY])
        .with_errmsg("database is locked");
    let db = open_mock(&engine)?;

    let mut stmt = db.prepare("UPDATE t SET x = 1", ())?;
    let err = stmt.step().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Step);
    assert!(err.to_string().starts_with(
        "failed to step, failed with: database is locked database is locked \
         for SQL \"UPDATE t SET x = 1\" in "
    ));
    assert_eq!(err.site().operation(), "step");

    Ok(())
}

#[test]
fn it_decodes_the_example_row() -> anyhow::Result<()> {
    let engine = MockEngine::new().with_rows([vec![
        MockValue::Integer(4711),
        MockValue::Null,
        MockValue::Text("hello world".into()),
        MockValue::Blob(vec![0x42, 0x43]),
    ]]);
    let db = open_mock(&engine)?;

    let row: (i64, Option<f64>, String, Option<Vec<u8>>) =
        db.execute_returning_one_row("SELECT a, b, c, d FROM t", ())?;
    assert_eq!(
        row,
        (4711, None, "hello world".into(), Some(vec![0x42, 0x43]))
    );

    // Columns are checked, then read, strictly left to right.
    let reads: Vec<Call> = engine
        .calls()
        .into_iter()
        .filter(|c| {
            matches!(
                c,
                Call::ColumnType(_)
                    | Call::ColumnInt64(_)
                    | Call::ColumnDouble(_)
                    | Call::ColumnText(_)
                    | Call::ColumnBlob(_)
            )
        })
        .collect();
    assert_eq!(
        reads,
        vec![
            Call::ColumnType(0),
            Call::ColumnInt64(0),
            Call::ColumnType(1),
            Call::ColumnType(2),
            Call::ColumnText(2),
            Call::ColumnType(3),
            Call::ColumnBlob(3),
        ]
    );

    Ok(())
}

#[test]
fn it_rejects_null_without_reading() -> anyhow::Result<()> {
    let engine = MockEngine::new().with_rows([vec![MockValue::Null]]);
    let db = open_mock(&engine)?;

    let err = db
        .execute_returning_one_row::<(f64,), _>("SELECT x", ())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NullConstraint);
    assert_eq!(err.code(), SQLITE_MISMATCH);
    assert_eq!(engine.count(&Call::ColumnDouble(0)), 0);

    Ok(())
}

#[test]
fn optional_columns_never_read_a_wrong_type() -> anyhow::Result<()> {
    let engine = MockEngine::new().with_rows([vec![MockValue::Real(1.5)]]);
    let db = open_mock(&engine)?;

    let err = db
        .execute_returning_one_row::<(Option<i64>,), _>("SELECT x", ())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    assert_eq!(
        err.context(),
        "column at index 0 has type REAL, expected INTEGER"
    );
    assert_eq!(engine.count(&Call::ColumnInt64(0)), 0);

    Ok(())
}

#[test]
fn it_reports_missing_text_and_blob_data() -> anyhow::Result<()> {
    let engine = MockEngine::new().with_rows([
        vec![MockValue::Missing(SqliteDataType::Text)],
        vec![MockValue::Missing(SqliteDataType::Blob)],
    ]);
    let db = open_mock(&engine)?;
    let mut stmt = db.prepare("SELECT x", ())?;

    assert!(stmt.step()?);
    let err = stmt.row::<(String,)>().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Extraction);
    assert_eq!(
        err.context(),
        "text extraction returned no data for index 0"
    );
    assert_eq!(err.code(), SQLITE_NOMEM);

    assert!(stmt.step()?);
    let err = stmt.row::<(Option<Vec<u8>>,)>().unwrap_err();
    assert_eq!(
        err.context(),
        "blob extraction returned no data for index 0"
    );

    Ok(())
}

#[test]
fn it_rejects_text_that_is_not_utf8() -> anyhow::Result<()> {
    let engine = MockEngine::new().with_rows([vec![MockValue::RawText(vec![0xc3, 0x28])]]);
    let db = open_mock(&engine)?;

    let err = db
        .execute_returning_one_row::<(String,), _>("SELECT x", ())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Extraction);

    Ok(())
}

#[test]
fn it_detects_more_than_one_row_after_two_steps() -> anyhow::Result<()> {
    let engine = MockEngine::new().with_rows((0..3).map(|i| vec![MockValue::Integer(i)]));
    let db = open_mock(&engine)?;

    let err = db
        .execute_returning_one_row::<(i64,), _>("SELECT x FROM t", ())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Cardinality);
    assert_eq!(err.context(), "expected exactly one row but found more");
    assert_eq!(err.engine_message(), None);
    assert!(err.to_string().starts_with(
        "expected exactly one row but found more for SQL \"SELECT x FROM t\" in "
    ));
    assert_eq!(engine.count(&Call::Step), 2);

    Ok(())
}

#[test]
fn it_detects_missing_rows() -> anyhow::Result<()> {
    let engine = MockEngine::new();
    let db = open_mock(&engine)?;

    let err = db
        .execute_returning_one_row::<(i64,), _>("SELECT x FROM t", ())
        .unwrap_err();
    assert_eq!(err.context(), "expected exactly one row but found none");

    Ok(())
}

#[test]
fn it_rejects_a_data_row_for_no_data_statements() -> anyhow::Result<()> {
    let engine = MockEngine::new().script_steps([SQLITE_ROW]);
    let db = open_mock(&engine)?;

    let err = db.execute_expecting_no_rows("DELETE FROM t", ()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Cardinality);
    assert_eq!(err.site().operation(), "execute_expecting_no_rows");
    assert_eq!(engine.count(&Call::Step), 1);

    Ok(())
}

#[test]
fn it_limits_collected_rows() -> anyhow::Result<()> {
    let engine = MockEngine::new().with_rows((0..5).map(|i| vec![MockValue::Integer(i)]));
    let db = open_mock(&engine)?;

    let mut stmt = rowbind::prepare_and_bind(&db, "SELECT x FROM t", ())?;
    let rows: Vec<(i64,)> = rowbind::get_rows(&mut stmt, Some(3))?;
    assert_eq!(rows, vec![(0,), (1,), (2,)]);
    assert_eq!(engine.count(&Call::Step), 3);

    let rows: Vec<(i64,)> = stmt.rows()?;
    assert_eq!(rows, vec![(3,), (4,)]);

    Ok(())
}

#[test]
fn it_resets_clears_and_rebinds_from_the_first_index() -> anyhow::Result<()> {
    let engine = MockEngine::new();
    let db = open_mock(&engine)?;

    let mut stmt = db.prepare("INSERT INTO t VALUES (?, ?)", (vec![1_u8], "a"))?;
    engine.clear_calls();

    stmt.reset_and_rebind((vec![2_u8, 3], "b"))?;
    assert_eq!(
        engine.calls(),
        vec![
            Call::Reset,
            Call::ClearBindings,
            Call::BindBlob(1, vec![2, 3]),
            Call::BindText(2, "b".into()),
        ]
    );

    Ok(())
}

#[test]
fn it_reports_reset_failures() -> anyhow::Result<()> {
    let engine = MockEngine::new().fail_reset(SQLITE_BUSY);
    let db = open_mock(&engine)?;
    let mut stmt = db.prepare("SELECT 1", ())?;

    let err = stmt.reset().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Reset);
    assert_eq!(err.context(), "failed to reset statement");
    assert_eq!(err.site().operation(), "reset");

    let err = rowbind::reset_and_rebind(&mut stmt, (1,)).unwrap_err();
    assert_eq!(err.site().operation(), "reset_and_rebind");
    assert_eq!(engine.count(&Call::ClearBindings), 0);

    Ok(())
}

#[test]
fn it_reports_clear_binding_failures() -> anyhow::Result<()> {
    let engine = MockEngine::new().fail_clear_bindings(SQLITE_MISUSE);
    let db = open_mock(&engine)?;
    let mut stmt = db.prepare("SELECT ?", (1,))?;
    engine.clear_calls();

    let err = stmt.reset_and_rebind((2,)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Reset);
    assert_eq!(err.context(), "failed to clear bindings");
    assert!(engine.binds().is_empty());

    Ok(())
}

#[test]
fn release_failures_are_not_raised() -> anyhow::Result<()> {
    let engine = MockEngine::new()
        .fail_finalize(SQLITE_BUSY)
        .fail_close(SQLITE_BUSY);

    {
        let db = open_mock(&engine)?;
        let stmt = db.prepare("SELECT 1", ())?;
        drop(stmt);
    }

    assert_eq!(engine.count(&Call::Finalize), 1);
    assert_eq!(engine.count(&Call::Close), 1);

    Ok(())
}

#[test]
fn it_reports_the_callers_location() -> anyhow::Result<()> {
    let engine = MockEngine::new().fail_bind_at(1, SQLITE_RANGE);
    let db = open_mock(&engine)?;

    let line = line!() + 1;
    let err = rowbind::prepare_and_bind(&db, "SELECT ?", (1,)).unwrap_err();
    assert_eq!(err.site().file(), file!());
    assert_eq!(err.site().line(), line);
    assert_eq!(err.site().operation(), "prepare_and_bind");

    Ok(())
}
