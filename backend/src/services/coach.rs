//! Diet coach chat
//!
//! [`CoachClient`] asks the model one question at a time; it never fails and
//! substitutes a friendly Thai apology when the model is silent or
//! unreachable. [`CoachConversation`] is the visible transcript.

use crate::services::gemini::{Content, ContentGenerator, GenerateContentRequest, Part};
use nutriscan_shared::{ChatMessage, CoachReply, ReplyStatus, Sender};
use std::sync::Arc;
use tracing::{instrument, warn};

const COACH_SYSTEM_INSTRUCTION: &str = r#"
You are a cheerful, friendly, and knowledgeable Personal Nutrition Coach named 'โค้ชกะทิ' (Coach Kathi).
Your goal is to help users plan healthy meals, check calories, and stay motivated.

Rules:
1. Always reply in Thai language.
2. Keep your answers concise (2-3 sentences max) unless asked for a list.
3. Use cute emojis (🥗, 🥑, ✨, 💪) to make the conversation fun.
4. If asked for meal suggestions, provide specific examples with approximate calories.
5. Be encouraging and positive.

Example interaction:
User: "กินอะไรดี 300 kcal?"
Coach: "ลอง 'ยำวุ้นเส้นอกไก่' ไหมคะ? 🌶️ ประมาณ 280 kcal เอง อร่อยแซ่บแถมโปรตีนสูงด้วยนะ! หรือจะเป็น 'โยเกิร์ตใส่ผลไม้' ก็สดชื่นดีค่ะ 🫐✨"
"#;

/// Reply when the model answers with no text
pub const EMPTY_REPLY_FALLBACK: &str = "ขออภัยค่ะ โค้ชกำลังมึนหัวนิดหน่อย ลองถามใหม่นะคะ 💫";

/// Reply when the model cannot be reached
pub const TRANSPORT_ERROR_FALLBACK: &str = "เกิดข้อผิดพลาดในการเชื่อมต่อ ลองใหม่อีกครั้งนะคะ 🥺";

/// First message of every conversation
pub const COACH_GREETING: &str = "สวัสดีค่ะ! โค้ชกะทิยินดีให้บริการ วันนี้ให้ช่วยคิดเมนูอะไรดีคะ? 🥗✨";

#[derive(Clone)]
pub struct CoachClient {
    generator: Arc<dyn ContentGenerator>,
}

impl CoachClient {
    pub fn new(generator: Arc<dyn ContentGenerator>) -> Self {
        Self { generator }
    }

    /// Ask the coach one stateless question
    #[instrument(skip(self, message), fields(chars = message.chars().count()))]
    pub async fn ask(&self, message: &str) -> CoachReply {
        let request = GenerateContentRequest {
            contents: vec![Content::user(vec![Part::text(message)])],
            system_instruction: Some(Content::system(COACH_SYSTEM_INSTRUCTION)),
            generation_config: None,
        };

        match self.generator.generate(&request).await {
            Ok(Some(text)) if !text.trim().is_empty() => CoachReply {
                status: ReplyStatus::Answered,
                text,
            },
            Ok(_) => {
                warn!("Coach returned an empty response");
                CoachReply {
                    status: ReplyStatus::EmptyResponse,
                    text: EMPTY_REPLY_FALLBACK.to_string(),
                }
            }
            Err(e) => {
                warn!(error = %e, "Coach request failed");
                CoachReply {
                    status: ReplyStatus::TransportError,
                    text: TRANSPORT_ERROR_FALLBACK.to_string(),
                }
            }
        }
    }
}

/// Ordered chat transcript, starting with the coach greeting
#[derive(Debug, Clone)]
pub struct CoachConversation {
    messages: Vec<ChatMessage>,
}

impl Default for CoachConversation {
    fn default() -> Self {
        Self::new()
    }
}

impl CoachConversation {
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::new(COACH_GREETING, Sender::Coach)],
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Append a question and its answer as one adjacent pair
    ///
    /// Blank questions are ignored and return `false`.
    pub fn record_exchange(&mut self, text: &str, reply: &CoachReply) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        self.messages.push(ChatMessage::new(text, Sender::User));
        self.messages
            .push(ChatMessage::new(reply.text.clone(), Sender::Coach));
        true
    }

    /// Ask the coach and record the exchange once the answer is in
    pub async fn send(&mut self, coach: &CoachClient, text: &str) -> Option<CoachReply> {
        if text.trim().is_empty() {
            return None;
        }
        let reply = coach.ask(text).await;
        self.record_exchange(text, &reply);
        Some(reply)
    }
}
