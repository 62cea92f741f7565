// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持中文（默认）和英文
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

use crate::domain::validation::ValidationError;
use crate::engine::NotFoundKind;

/// 获取当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 设置语言
///
/// # 参数
/// - locale: 语言代码（"zh-CN" 或 "en"）
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// 翻译消息（无参数）
///
/// # 示例
/// ```no_run
/// use grc_workflow::i18n::t;
/// let msg = t("common.success");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 翻译消息（带参数）
///
/// # 示例
/// ```no_run
/// use grc_workflow::i18n::t_with_args;
/// let msg = t_with_args("error.config", &[("detail", "locale=fr")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

/// 对象类别名称
pub fn kind_name(kind: NotFoundKind) -> String {
    match kind {
        NotFoundKind::Template => t("kind.template"),
        NotFoundKind::Module => t("kind.module"),
        NotFoundKind::Step => t("kind.step"),
    }
}

/// 校验违规的用户提示
pub fn validation_message(error: &ValidationError) -> String {
    match error {
        ValidationError::HardGateBypass { step_id } => {
            t_with_args("validation.hard_gate_bypass", &[("step", step_id.as_str())])
        }
        ValidationError::MissingEvidence {
            step_id,
            evidence_type,
        } => t_with_args(
            "validation.missing_evidence",
            &[("step", step_id.as_str()), ("evidence", evidence_type.as_str())],
        ),
        ValidationError::DurationExceeded {
            total_days,
            limit_days,
        } => t_with_args(
            "validation.duration_exceeded",
            &[
                ("total", total_days.to_string().as_str()),
                ("limit", limit_days.to_string().as_str()),
            ],
        ),
    }
}
