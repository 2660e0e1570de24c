//! 내장 catcher 세트
//!
//! 별도 정의 파일이 없을 때 사용하는 Apex 호출 지점 패턴입니다.
//! SOAP 웹서비스와 REST 리소스(inbound), HTTP 요청(outbound)을 감지합니다.

use super::types::{CatcherDef, DetailDef};

/// 내장 catcher 정의 목록을 반환합니다.
pub fn builtin_defs() -> Vec<CatcherDef> {
    vec![
        CatcherDef {
            id: "inbound-soap".to_owned(),
            category: "INBOUND".to_owned(),
            sub_category: "SOAP".to_owned(),
            primary_pattern: r"webservice\s+static".to_owned(),
            details: vec![DetailDef::new(
                "webServiceName",
                r"webservice\s+static\s+(?P<value>.*?)\{",
            )],
        },
        CatcherDef {
            id: "inbound-rest".to_owned(),
            category: "INBOUND".to_owned(),
            sub_category: "REST".to_owned(),
            primary_pattern: r"@RestResource".to_owned(),
            details: vec![DetailDef::new(
                "restResource",
                r"@RestResource\((?P<value>.*?)\)",
            )],
        },
        CatcherDef {
            id: "outbound-http".to_owned(),
            category: "OUTBOUND".to_owned(),
            sub_category: "HTTP".to_owned(),
            primary_pattern: r"new\s+HttpRequest".to_owned(),
            details: vec![DetailDef::new(
                "endPoint",
                r"setEndpoint\((?P<value>.*?);",
            )],
        },
    ]
}
