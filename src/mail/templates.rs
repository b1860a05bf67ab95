//! Message bodies. All user-supplied text is HTML-escaped before it is
//! placed into markup.

use crate::mail::OutgoingMail;
use crate::types::Contact;
use html_escape::encode_text;

pub const CONTACT_SUBJECT: &str = "Portfolio Contact: Contact Form";
pub const WELCOME_SUBJECT: &str = "Welcome to Portfolio Admin Panel!";

fn field(label: &str, value: &str) -> String {
    format!(
        r#"<div style="margin-bottom: 20px; padding: 15px; background: #f8f9fa; border-left: 4px solid #667eea; border-radius: 5px;">
  <div style="font-weight: bold; color: #333; font-size: 14px; text-transform: uppercase; letter-spacing: 1px; margin-bottom: 5px;">{}</div>
  <div style="color: #555; font-size: 16px;">{}</div>
</div>"#,
        label,
        encode_text(value)
    )
}

/// Notification to the site owner about a contact form submission.
pub fn contact_notification(notify: &str, contact: &Contact) -> OutgoingMail {
    let html = format!(
        r#"<div style="font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; line-height: 1.6; padding: 20px; background-color: #f4f4f4;">
<div style="max-width: 600px; margin: 0 auto; background: white; border-radius: 10px; overflow: hidden;">
<div style="background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 30px 20px; text-align: center;">
  <h1 style="margin: 0; font-size: 24px; font-weight: 300;">New Portfolio Contact</h1>
</div>
<div style="padding: 30px;">
{}
{}
{}
{}
</div>
<div style="background: #f8f9fa; padding: 20px; text-align: center; color: #666; font-size: 12px;">
  <p style="margin: 5px 0;">This message was sent from your portfolio website</p>
</div>
</div>
</div>"#,
        field("Name", &contact.name),
        field("Email Address", &contact.email),
        field("Phone Number", &contact.phone),
        field("Message", &contact.message),
    );

    let text = format!(
        "New Portfolio Contact Message\n\n\
         Name: {}\n\
         Email: {}\n\
         Phone: {}\n\n\
         Message:\n{}\n\n\
         ---\n\
         This message was sent from your portfolio website.\n",
        contact.name, contact.email, contact.phone, contact.message
    );

    OutgoingMail {
        to: vec![notify.to_string()],
        subject: CONTACT_SUBJECT.to_string(),
        html,
        text: Some(text),
    }
}

/// Greeting for a newly created admin account.
pub fn welcome(email: &str, username: &str) -> OutgoingMail {
    let html = format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px; background-color: #f4f4f4;">
<div style="background: white; padding: 30px; border-radius: 10px;">
  <h2 style="color: #333; margin-bottom: 20px;">Welcome {}!</h2>
  <p style="color: #555; line-height: 1.6;">You have successfully registered to the portfolio admin panel.</p>
  <p style="color: #555; line-height: 1.6;">You can now manage your portfolio content.</p>
</div>
</div>"#,
        encode_text(username)
    );

    OutgoingMail {
        to: vec![email.to_string()],
        subject: WELCOME_SUBJECT.to_string(),
        html,
        text: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(message: &str) -> Contact {
        Contact {
            id: 0,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: "555-0100".to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_contact_notification_fields() {
        let mail = contact_notification("owner@example.com", &contact("Hello there"));

        assert_eq!(mail.to, vec!["owner@example.com"]);
        assert_eq!(mail.subject, CONTACT_SUBJECT);
        for expected in ["Ada", "ada@example.com", "555-0100", "Hello there"] {
            assert!(mail.html.contains(expected));
            assert!(mail.text.as_deref().unwrap().contains(expected));
        }
    }

    #[test]
    fn test_contact_markup_is_escaped() {
        let mail = contact_notification("owner@example.com", &contact("<script>alert(1)</script>"));

        assert!(!mail.html.contains("<script>"));
        assert!(mail.html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_welcome() {
        let mail = welcome("new@example.com", "<b>bob</b>");

        assert_eq!(mail.to, vec!["new@example.com"]);
        assert_eq!(mail.subject, WELCOME_SUBJECT);
        assert!(mail.html.contains("&lt;b&gt;bob&lt;/b&gt;"));
        assert!(mail.text.is_none());
    }
}
