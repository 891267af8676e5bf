use super::*;

const ANDROID: &str = "Mozilla/5.0 (Linux; Android 9; Pixel 3) AppleWebKit/537.36 Chrome/76.0 Mobile Safari/537.36";
const IPHONE: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 12_1 like Mac OS X) AppleWebKit/605.1.15 Mobile/15E148";
const IPHONE_OS4: &str = "Mozilla/5.0 (iPhone; U; CPU iPhone OS 4_3_3 like Mac OS X) AppleWebKit/533.17.9 Mobile/8J2";
const WINDOWS_PHONE: &str =
    "Mozilla/5.0 (Mobile; Windows Phone 8.1; Android 4.0; ARM; Trident/7.0; Touch; rv:11.0; IEMobile/11.0) like iPhone";
const DESKTOP: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:109.0) Gecko/20100101 Firefox/115.0";

#[test]
fn detects_android() {
    let caps = Capabilities::from_user_agent(ANDROID);
    assert!(caps.android);
    assert!(!caps.ios);
}

#[test]
fn detects_ios() {
    let caps = Capabilities::from_user_agent(IPHONE);
    assert!(caps.ios);
    assert!(!caps.ios4);
    assert!(!caps.android);
}

#[test]
fn detects_ios4() {
    let caps = Capabilities::from_user_agent(IPHONE_OS4);
    assert!(caps.ios);
    assert!(caps.ios4);
}

#[test]
fn windows_phone_is_neither_android_nor_ios() {
    let caps = Capabilities::from_user_agent(WINDOWS_PHONE);
    assert!(caps.windows_phone);
    assert!(!caps.android);
    assert!(!caps.ios);
}

#[test]
fn desktop_has_no_flags() {
    assert_eq!(Capabilities::from_user_agent(DESKTOP), Capabilities::default());
}

#[test]
fn android_at_start_of_string_is_not_matched() {
    assert!(!Capabilities::from_user_agent("Android").android);
}
