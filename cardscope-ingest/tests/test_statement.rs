use cardscope_core::{
    by_exact_range, by_year_month, card_summaries, cashback_by_category, to_json, CoreError,
};
use cardscope_ingest::read_statement;
use std::fs;

const HEADER: &str = "Дата операции;Дата платежа;Номер карты;Статус;Сумма операции;Валюта операции;\
Сумма платежа;Кэшбэк;Категория;MCC;Описание;Сумма операции с округлением";

fn write_statement(rows: &[&str]) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("operations.csv");
    let mut body = String::from(HEADER);
    for row in rows {
        body.push('\n');
        body.push_str(row);
    }
    fs::write(&path, body).unwrap();
    (dir, path)
}

#[test]
fn test_csv_statement_through_pipeline() {
    let (_dir, path) = write_statement(&[
        "31.12.2021 16:44:00;31.12.2021;*7197;OK;-160,89;RUB;-160,89;2;Супермаркеты;5411;Колхоз;160,89",
        "2021-12-30 12:00:00;30.12.2021;*7197;OK;-1 000,00;RUB;-1 000,00;10;Такси;4121;Яндекс Такси;1 000,00",
        "29.12.2021 09:15:00;29.12.2021;;OK;-64,00;RUB;-64,00;;Супермаркеты;5411;Магнит;64,00",
        "15.11.2021 10:00:00;15.11.2021;*5091;OK;-500,00;RUB;-500,00;5;Аптеки;5912;Аптека;500,00",
    ]);

    let txns = read_statement(&path).unwrap();
    assert_eq!(txns.len(), 4);
    assert_eq!(txns[1].operation_date, "30.12.2021 12:00:00");
    assert_eq!(txns[1].payment_amount, -1000.0);
    assert_eq!(txns[2].card_number, None);
    assert_eq!(txns[2].cashback, None);

    let month = by_exact_range("31.12.2021 23:59:59", &txns).unwrap();
    assert_eq!(month.len(), 3);
    let cards = card_summaries(month.iter().copied());
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].last_digits, "7197");
    assert_eq!(cards[0].total_spent, 1160.89);

    let december = by_year_month(2021, 12, &txns).unwrap();
    let json = to_json(&cashback_by_category(december.iter().copied())).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value, serde_json::json!({"Такси": 10, "Супермаркеты": 2}));
    assert!(json.find("Такси").unwrap() < json.find("Супермаркеты").unwrap());
}

#[test]
fn test_unparsable_dates_surface_in_core() {
    let (_dir, path) = write_statement(&[
        "31.12.2021 16:44:00;31.12.2021;*7197;OK;-10,00;RUB;-10,00;;Такси;4121;Такси;10,00",
        "вчера;;*7197;OK;-20,00;RUB;-20,00;;Такси;4121;Такси;20,00",
    ]);

    let txns = read_statement(&path).unwrap();
    assert_eq!(txns[1].operation_date, "вчера");
    match by_exact_range("31.12.2021 23:00:00", &txns) {
        Err(CoreError::InvalidDate { value, .. }) => assert_eq!(value, "вчера"),
        other => panic!("expected InvalidDate, got {other:?}"),
    }
}

#[test]
fn test_missing_date_column_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("operations.csv");
    fs::write(&path, "Описание;Сумма платежа\nКолхоз;-10,00\n").unwrap();
    let err = read_statement(&path).unwrap_err();
    assert!(format!("{err:#}").contains("Дата операции"));
}
