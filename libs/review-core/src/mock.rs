//! Built-in lessons shown when the lesson backend cannot be used.
//!
//! Both collections satisfy the cursor's non-empty invariant.

use crate::lesson::LessonContent;
use crate::types::{InnerItem, LessonInfo, OuterItem, ScreenKind};

const VOCABULARY: &[(i64, &str, &str, &str)] = &[
    (1, "你好", "nǐ hǎo", "Chào bạn"),
    (2, "谢谢", "xiè xiè", "Cảm ơn"),
    (3, "再见", "zài jiàn", "Tạm biệt"),
    (4, "对不起", "duì bù qǐ", "Xin lỗi"),
    (5, "没关系", "méi guān xì", "Không sao"),
    (6, "请", "qǐng", "Xin vui lòng"),
    (7, "是", "shì", "Là / Đúng"),
    (8, "不", "bù", "Không"),
    (9, "好", "hǎo", "Tốt"),
    (10, "我", "wǒ", "Tôi"),
    (11, "你", "nǐ", "Bạn"),
    (12, "他", "tā", "Anh ấy"),
];

struct MockExample {
    id: i64,
    keyword: &'static str,
    keyword_pinyin: &'static str,
    meaning: &'static str,
    chinese: &'static str,
    pinyin: &'static str,
    vietnamese: &'static str,
}

const EXAMPLES: &[MockExample] = &[
    MockExample {
        id: 1,
        keyword: "喜欢",
        keyword_pinyin: "xǐhuān",
        meaning: "Thích",
        chinese: "我喜欢喝茶。",
        pinyin: "Wǒ xǐhuān hē chá.",
        vietnamese: "Tôi thích uống trà.",
    },
    MockExample {
        id: 2,
        keyword: "朋友",
        keyword_pinyin: "péngyou",
        meaning: "Bạn bè",
        chinese: "他是我的朋友。",
        pinyin: "Tā shì wǒ de péngyou.",
        vietnamese: "Anh ấy là bạn của tôi.",
    },
    MockExample {
        id: 3,
        keyword: "天气",
        keyword_pinyin: "tiānqì",
        meaning: "Thời tiết",
        chinese: "今天天气很好。",
        pinyin: "Jīntiān tiānqì hěn hǎo.",
        vietnamese: "Hôm nay thời tiết rất đẹp.",
    },
    MockExample {
        id: 4,
        keyword: "苹果",
        keyword_pinyin: "píngguǒ",
        meaning: "Quả táo",
        chinese: "我想吃苹果。",
        pinyin: "Wǒ xiǎng chī píngguǒ.",
        vietnamese: "Tôi muốn ăn táo.",
    },
    MockExample {
        id: 5,
        keyword: "中文",
        keyword_pinyin: "zhōngwén",
        meaning: "Tiếng Trung",
        chinese: "她会说中文。",
        pinyin: "Tā huì shuō zhōngwén.",
        vietnamese: "Cô ấy biết nói tiếng Trung.",
    },
];

/// Fallback lesson for a screen.
pub fn lesson(kind: ScreenKind, lesson_id: i64) -> LessonContent {
    let items = match kind {
        ScreenKind::Vocabulary => vocabulary(),
        ScreenKind::Grammar => grammar(),
    };
    LessonContent {
        info: LessonInfo::placeholder(lesson_id, 1),
        items,
    }
}

pub fn vocabulary() -> Vec<OuterItem> {
    VOCABULARY
        .iter()
        .map(|&(id, word, pinyin, meaning)| OuterItem {
            id: id.to_string(),
            remote_id: Some(id),
            word: word.to_string(),
            transliteration: pinyin.to_string(),
            meaning: meaning.to_string(),
            inner: vec![InnerItem {
                id: id.to_string(),
                remote_id: Some(id),
                text: word.to_string(),
                transliteration: pinyin.to_string(),
                translation: meaning.to_string(),
                keyword: None,
                keyword_transliteration: None,
            }],
        })
        .collect()
}

/// One outer item per keyword, each owning its example sentence.
pub fn grammar() -> Vec<OuterItem> {
    EXAMPLES
        .iter()
        .map(|ex| OuterItem {
            id: ex.id.to_string(),
            remote_id: None,
            word: ex.keyword.to_string(),
            transliteration: ex.keyword_pinyin.to_string(),
            meaning: ex.meaning.to_string(),
            inner: vec![InnerItem {
                id: ex.id.to_string(),
                remote_id: Some(ex.id),
                text: ex.chinese.to_string(),
                transliteration: ex.pinyin.to_string(),
                translation: ex.vietnamese.to_string(),
                keyword: Some(ex.keyword.to_string()),
                keyword_transliteration: Some(ex.keyword_pinyin.to_string()),
            }],
        })
        .collect()
}
