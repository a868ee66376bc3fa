//! Canned-reply assistant: lowercase substring matching over a fixed rule
//! list, with an optional navigation hint alongside the reply. Entirely
//! pure; the presentation layer decides what a hint does.

/// Where the assistant suggests the user go next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatAction {
    ShowMenu,
    ShowCart,
    ShowOrders,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub text: &'static str,
    pub action: Option<ChatAction>,
}

pub fn respond(message: &str) -> ChatReply {
    let text = message.to_lowercase();
    ChatReply {
        text: reply_for(&text),
        action: action_for(&text),
    }
}

/// First matching rule wins; the order mirrors how a counter hand would
/// triage the question.
fn reply_for(text: &str) -> &'static str {
    if text.contains("hi") || text.contains("hello") || text.contains("hey") {
        "Hello! How can I help you with your cafeteria order today?"
    } else if text.contains("order") && text.contains("how") {
        "To place an order, browse the menu and add the items you want to \
         your cart, then place the order from the cart."
    } else if text.contains("cart") {
        "Your cart holds everything you have picked so far. I can take you \
         there now."
    } else if text.contains("menu") {
        "I'll show you our menu with all available items."
    } else if text.contains("orders") {
        "I'll take you to your order history."
    } else if text.contains("veg") {
        "You can narrow the menu to vegetarian items with the veg-only \
         filter."
    } else if text.contains("payment") || text.contains("pay") {
        "We only take cash at the counter. Place your order and pay when \
         you pick it up."
    } else if text.contains("time") || text.contains("how long") {
        "Orders typically take 10-15 minutes to prepare. You can check the \
         status in your order history."
    } else if text.contains("thank") {
        "You're welcome! Anything else I can help you with?"
    } else if text.contains("bye") || text.contains("goodbye") {
        "Thank you for chatting! Feel free to ask if you need anything else."
    } else {
        "I'm not sure I understand. You can ask about how to order, check \
         your cart, view the menu, or see your orders."
    }
}

/// Independent of which reply fired, so "how do I order from the menu"
/// both explains ordering and points at the menu.
fn action_for(text: &str) -> Option<ChatAction> {
    if text.contains("menu") {
        Some(ChatAction::ShowMenu)
    } else if text.contains("cart") {
        Some(ChatAction::ShowCart)
    } else if text.contains("orders") {
        Some(ChatAction::ShowOrders)
    } else {
        None
    }
}
