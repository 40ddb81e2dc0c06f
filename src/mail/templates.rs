//! Embedded HTML layouts for the named message templates.
//!
//! Bodies interpolate via triple braces so callers may pass markup.
//! `{{org_name}}` and `{{year}}` are injected by the composer when the
//! caller's data leaves them out.

use super::types::TemplateName;

const NOTIFICATION: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <style>
    body { font-family: Arial, sans-serif; }
    .container { max-width: 600px; margin: 0 auto; padding: 20px; }
    .header { background: #0073c5; color: white; padding: 20px; text-align: center; }
    .content { padding: 20px; background: #f9fafb; }
    .footer { text-align: center; padding: 20px; color: #666; font-size: 12px; }
  </style>
</head>
<body>
  <div class="container">
    <div class="header">
      <h1>{{org_name}}</h1>
    </div>
    <div class="content">
      {{{message}}}
    </div>
    <div class="footer">
      &copy; {{year}} {{org_name}}
    </div>
  </div>
</body>
</html>
"#;

const APPROVAL: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <style>
    body { font-family: Arial, sans-serif; }
    .container { max-width: 600px; margin: 0 auto; padding: 20px; }
    .header { background: #10b981; color: white; padding: 20px; text-align: center; }
    .content { padding: 20px; background: #f9fafb; }
    .info { background: white; padding: 15px; margin: 10px 0; border-radius: 8px; }
  </style>
</head>
<body>
  <div class="container">
    <div class="header">
      <h1>Request Approved</h1>
    </div>
    <div class="content">
      <p>Dear {{family_name}},</p>
      <p>Your support request has been approved.</p>
      <div class="info">
        <p><strong>Approved amount:</strong> {{amount}}</p>
        <p><strong>Date:</strong> {{date}}</p>
      </div>
      <p>{{org_name}}</p>
    </div>
  </div>
</body>
</html>
"#;

const REMINDER: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <style>
    body { font-family: Arial, sans-serif; }
    .container { max-width: 600px; margin: 0 auto; padding: 20px; }
    .header { background: #f59e0b; color: white; padding: 20px; text-align: center; }
    .content { padding: 20px; background: #f9fafb; }
  </style>
</head>
<body>
  <div class="container">
    <div class="header">
      <h1>Reminder</h1>
    </div>
    <div class="content">
      <p>{{{message}}}</p>
    </div>
  </div>
</body>
</html>
"#;

const REPORT: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <style>
    body { font-family: Arial, sans-serif; }
    .container { max-width: 600px; margin: 0 auto; padding: 20px; }
    .header { background: #6366f1; color: white; padding: 20px; text-align: center; }
    .content { padding: 20px; background: #f9fafb; }
    table { width: 100%; border-collapse: collapse; margin: 15px 0; }
    th, td { padding: 10px; text-align: left; border: 1px solid #ddd; }
    th { background: #e5e7eb; }
  </style>
</head>
<body>
  <div class="container">
    <div class="header">
      <h1>Monthly Report - {{org_name}}</h1>
    </div>
    <div class="content">
      {{{report}}}
    </div>
  </div>
</body>
</html>
"#;

pub(super) const fn source(name: TemplateName) -> &'static str {
    match name {
        TemplateName::Notification => NOTIFICATION,
        TemplateName::Approval => APPROVAL,
        TemplateName::Reminder => REMINDER,
        TemplateName::Report => REPORT,
    }
}
