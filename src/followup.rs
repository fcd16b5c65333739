//! Follow-up action dispatcher
//!
//! A pure lookup from action identifier to canned reply; no external
//! calls. The known actions form a short manually authored conversation
//! tree: `view_penalty` leads to `contest_penalty`, which is terminal.
//! Anything else gets a generic acknowledgment echoing the action.

use crate::relay::SaathiReply;

/// Resolve a follow-up action to its canned reply
#[must_use]
pub fn dispatch(action: &str) -> SaathiReply {
    match action {
        "view_penalty" => SaathiReply {
            speech_text: "Penalty details: Delivery late by 30 minutes. Aap contest karna chahte hain?".to_string(),
            visual: "Penalty: ₹100 • Reason: Late by 30 min".to_string(),
            followup_action: Some("contest_penalty".to_string()),
            audio_url: None,
        },
        "contest_penalty" => SaathiReply {
            speech_text: "Theek hai, contest request submit ho gayi. Support team 24 ghante mein contact karegi.".to_string(),
            visual: "Contest submitted • Response within 24h".to_string(),
            followup_action: None,
            audio_url: None,
        },
        other => SaathiReply {
            speech_text: "Action completed.".to_string(),
            visual: other.to_string(),
            followup_action: None,
            audio_url: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_penalty_is_canned() {
        let reply = dispatch("view_penalty");
        assert_eq!(
            reply.speech_text,
            "Penalty details: Delivery late by 30 minutes. Aap contest karna chahte hain?"
        );
        assert_eq!(reply.visual, "Penalty: ₹100 • Reason: Late by 30 min");
        assert_eq!(reply.followup_action.as_deref(), Some("contest_penalty"));
        assert!(reply.audio_url.is_none());
    }

    #[test]
    fn conversation_tree_terminates() {
        // view_penalty -> contest_penalty -> no further action
        let first = dispatch("view_penalty");
        let second = dispatch(first.followup_action.as_deref().unwrap());
        assert!(second.followup_action.is_none());
    }

    #[test]
    fn unknown_action_echoes_name() {
        let reply = dispatch("show_bonus");
        assert_eq!(reply.speech_text, "Action completed.");
        assert_eq!(reply.visual, "show_bonus");
        assert!(reply.followup_action.is_none());
    }
}
