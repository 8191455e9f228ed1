use chrono::Utc;
use uuid::Uuid;

pub const METHOD_POST: &str = "POST";

pub fn sign(method: &str, url: &str, body: &str, app_master_secret: &str) -> String {
    let input = format!("{}{}{}{}", method, url, body, app_master_secret);
    format!("{:x}", md5::compute(input.as_bytes()))
}

pub fn current_timestamp_millis() -> i64 {
    Utc::now().timestamp_millis()
}

pub fn new_out_biz_no() -> String {
    Uuid::new_v4().simple().to_string()
}
