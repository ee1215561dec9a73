//! English-to-Chinese product phrase dictionary used to build sourcing search
//! terms. Entry order is significant: partial matches resolve to the first
//! entry that overlaps the keyword.

use std::collections::HashSet;

/// Word used when no keyword maps to a localized term ("product").
pub const FALLBACK_TERM: &str = "产品";

const NOISE_WORDS: &[&str] = &[
    "for", "with", "and", "the", "a", "an", "of", "in", "on", "at", "new", "hot", "best", "sale",
    "free", "shipping", "pack", "pcs", "set", "kit", "piece", "pieces", "lot",
];

const PRODUCT_PHRASES: &[(&str, &[&str])] = &[
    // electronics
    ("wireless earbuds", &["无线耳机", "蓝牙耳机", "TWS耳机"]),
    ("bluetooth earbuds", &["蓝牙耳机", "无线蓝牙耳机"]),
    ("headphones", &["耳机", "头戴式耳机"]),
    ("speaker", &["音箱", "蓝牙音箱", "音响"]),
    ("charger", &["充电器", "快充充电器"]),
    ("power bank", &["充电宝", "移动电源"]),
    ("phone case", &["手机壳", "手机保护套"]),
    ("screen protector", &["钢化膜", "屏幕保护膜"]),
    ("cable", &["数据线", "充电线"]),
    ("usb cable", &["USB数据线", "充电线"]),
    ("smart watch", &["智能手表", "运动手表"]),
    ("fitness tracker", &["运动手环", "智能手环"]),
    // home and garden
    ("led light", &["LED灯", "灯带", "LED灯条"]),
    ("lamp", &["台灯", "灯具"]),
    ("storage box", &["收纳箱", "收纳盒"]),
    ("organizer", &["收纳架", "收纳盒"]),
    ("kitchen tool", &["厨房用品", "厨具"]),
    ("water bottle", &["水杯", "保温杯", "水壶"]),
    ("pillow", &["枕头", "靠枕"]),
    ("blanket", &["毛毯", "毯子"]),
    ("curtain", &["窗帘"]),
    ("rug", &["地毯", "地垫"]),
    // fashion
    ("watch", &["手表", "石英表"]),
    ("sunglasses", &["太阳镜", "墨镜"]),
    ("bag", &["包", "背包", "手提包"]),
    ("backpack", &["背包", "双肩包"]),
    ("wallet", &["钱包", "皮夹"]),
    ("belt", &["皮带", "腰带"]),
    ("hat", &["帽子", "鸭舌帽"]),
    ("scarf", &["围巾", "丝巾"]),
    ("jewelry", &["首饰", "饰品"]),
    ("necklace", &["项链"]),
    ("bracelet", &["手链", "手镯"]),
    ("ring", &["戒指"]),
    ("earrings", &["耳环", "耳饰"]),
    // toys
    ("toy", &["玩具"]),
    ("puzzle", &["拼图", "益智玩具"]),
    ("board game", &["桌游", "棋牌游戏"]),
    ("drone", &["无人机", "遥控飞机"]),
    ("rc car", &["遥控车", "RC汽车"]),
    ("plush toy", &["毛绒玩具", "公仔"]),
    // sports
    ("yoga mat", &["瑜伽垫"]),
    ("resistance band", &["弹力带", "拉力带"]),
    ("dumbbell", &["哑铃"]),
    ("sports bottle", &["运动水壶"]),
    ("gym bag", &["健身包", "运动包"]),
    // beauty
    ("makeup brush", &["化妆刷", "刷子套装"]),
    ("makeup", &["化妆品", "彩妆"]),
    ("skincare", &["护肤品"]),
    ("hair tool", &["美发工具"]),
    ("nail art", &["美甲", "指甲油"]),
    // pet
    ("pet toy", &["宠物玩具", "狗玩具", "猫玩具"]),
    ("pet bed", &["宠物窝", "狗窝", "猫窝"]),
    ("pet collar", &["宠物项圈", "狗项圈"]),
    ("pet bowl", &["宠物碗", "狗碗", "猫碗"]),
];

/// Ordered phrase map plus the noise-word set consulted during extraction.
///
/// The built-in tables are the default; callers can inject their own to
/// extend coverage without touching the extraction rules.
#[derive(Debug, Clone)]
pub struct KeywordDictionary {
    phrases: Vec<(String, Vec<String>)>,
    noise_words: HashSet<String>,
    fallback: String,
}

impl KeywordDictionary {
    /// Builds a dictionary from ordered `(english, localized terms)` pairs.
    /// English phrases are lowercased; the first occurrence of a phrase wins.
    #[must_use]
    pub fn new<I, S, T>(phrases: I, noise_words: &[&str]) -> Self
    where
        I: IntoIterator<Item = (S, Vec<T>)>,
        S: AsRef<str>,
        T: Into<String>,
    {
        let mut ordered: Vec<(String, Vec<String>)> = Vec::new();
        for (english, terms) in phrases {
            let english = english.as_ref().trim().to_lowercase();
            if english.is_empty() || ordered.iter().any(|(e, _)| *e == english) {
                continue;
            }
            ordered.push((english, terms.into_iter().map(Into::into).collect()));
        }

        Self {
            phrases: ordered,
            noise_words: noise_words.iter().map(|w| w.to_lowercase()).collect(),
            fallback: FALLBACK_TERM.to_string(),
        }
    }

    #[must_use]
    pub fn builtin() -> Self {
        Self::new(
            PRODUCT_PHRASES
                .iter()
                .map(|(english, terms)| (*english, terms.to_vec())),
            NOISE_WORDS,
        )
    }

    #[must_use]
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }

    #[must_use]
    pub fn is_noise(&self, word: &str) -> bool {
        self.noise_words.contains(word)
    }

    #[must_use]
    pub fn contains_phrase(&self, phrase: &str) -> bool {
        self.exact(phrase).is_some()
    }

    /// Localized terms for an exact (lowercased) phrase.
    #[must_use]
    pub fn exact(&self, phrase: &str) -> Option<&[String]> {
        self.phrases
            .iter()
            .find(|(english, _)| english == phrase)
            .map(|(_, terms)| terms.as_slice())
    }

    /// First localized term of the first entry whose phrase contains, or is
    /// contained in, `keyword`.
    #[must_use]
    pub fn first_partial(&self, keyword: &str) -> Option<&str> {
        self.phrases
            .iter()
            .find(|(english, _)| english.contains(keyword) || keyword.contains(english.as_str()))
            .and_then(|(_, terms)| terms.first())
            .map(String::as_str)
    }

    #[must_use]
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    pub fn phrases(&self) -> impl Iterator<Item = &str> {
        self.phrases.iter().map(|(english, _)| english.as_str())
    }
}

impl Default for KeywordDictionary {
    fn default() -> Self {
        Self::builtin()
    }
}
