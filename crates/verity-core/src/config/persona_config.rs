use serde::{Deserialize, Serialize};

/// Fixed texts: persona, refusals, canned fallbacks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonaConfig {
    pub organization: String,
    pub mission: String,
    pub vision: String,
    pub slogan: String,
    /// Shared refusal for blocked and ungrounded answers.
    pub ng_message: String,
    /// Returned when the hallucination retry cannot produce an answer.
    pub retry_refusal: String,
    /// Returned when multi-best selection yields nothing.
    pub insufficient_evidence: String,
    /// Stand-in evidence when single-best selection answers 0.
    pub no_knowledge: String,
    /// Evidence used for greeting and unknown-intent queries.
    pub greeting_knowledge: String,
    /// FAQ text used when FAQ retrieval is skipped or fails.
    pub default_faq: String,
    /// Canned answers when generation fails, by topic.
    pub fallback_greeting: String,
    pub fallback_brand: String,
    pub fallback_philosophy: String,
    pub fallback_generic: String,
    /// Answer returned when retrieval is unavailable.
    pub retrieval_unavailable: String,
}

impl Default for PersonaConfig {
    fn default() -> Self {
        Self {
            organization: "Nitto（日東電工株式会社）".to_string(),
            mission: "新しい発想でお客様の価値創造に貢献します".to_string(),
            vision: "クリエイティング ワンダーズ（驚きと感動を生み出す）".to_string(),
            slogan: "Innovation for Customers".to_string(),
            ng_message: "申し訳ございませんが、その質問にはお答えできません。私はNittoグループに関する内容について学習中であるため、関連性の低い質問にはお答えできない場合があります。Nittoに関するご質問をお待ちしています。".to_string(),
            retry_refusal: "申し訳ございませんが、適切な情報を見つけることができませんでした。Nittoグループに関する他のご質問をお聞かせください。".to_string(),
            insufficient_evidence: "申し訳ございませんが、資料の中から十分な情報を見つけることができませんでした。私はまだ学習中のため、Nittoグループに関する別のご質問をお聞かせください。".to_string(),
            no_knowledge: "該当する知識は存在しません。Nittoに関係しない話題には回答を差し控えてください。".to_string(),
            greeting_knowledge: "Nitto知識: Nittoグループは「クリエイティング ワンダーズ」をVisionに掲げ、顧客価値創造に貢献します。".to_string(),
            default_faq: "FAQ: Nittoの事業・技術についてお気軽にご質問ください。".to_string(),
            fallback_greeting: "こんにちは！私はNittoの社員です。このAIアバターはデータサイエンスグループが開発しました。Nittoグループに関するご質問をお気軽にお聞かせください。".to_string(),
            fallback_brand: "ご質問ありがとうございます。Nittoグループは「クリエイティング ワンダーズ」をVisionに掲げ、お客様の価値創造に貢献する製品・システム・アイデアを提供しています。具体的なご質問があれば、詳しくご説明いたします。".to_string(),
            fallback_philosophy: "Nittoグループの経営理念についてお尋ねいただき、ありがとうございます。私たちのMissionは「新しい発想でお客様の価値創造に貢献します」、Visionは「クリエイティング ワンダーズ」です。".to_string(),
            fallback_generic: "貴重なご質問をありがとうございます。Nittoグループの様々な取り組みについて、詳しくご説明いたします。どのような点について詳しくお聞きになりたいでしょうか。".to_string(),
            retrieval_unavailable: "申し訳ございません。ただいま情報を検索できませんでした。しばらくしてから改めてご質問ください。".to_string(),
        }
    }
}
