//! Static parts of the grid page and the escaping used for embedded paths.

/// Expected extension of the output document.
pub const DOCUMENT_EXTENSION: &str = "html";

/// Side length of every thumbnail, in CSS pixels.
pub const THUMBNAIL_PX: u32 = 100;

/// Everything up to and including the opening `<table>`: overlay styling,
/// the hidden overlay region and the `show_images` / `close_overlay` script.
pub const PREAMBLE: &str = r##"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Self-organizing map</title>
<style type="text/css">
    #overlay {
        position: absolute;
        top: 40px;
        left: 40px;
        width: 400px;
        height: 400px;
        overflow: auto;
        text-align: center;
        background-color: #000;
        display: none;
    }
    td {
        width: 100px;
        height: 100px;
    }
</style>
<script type="text/javascript">
    function close_overlay() {
        document.getElementById('overlay').style.display = 'none';
    }

    function show_images(imgs) {
        if (imgs.length == 0) {
            alert("No other images in that neuron!");
            return;
        }
        var div = document.getElementById('overlay');
        div.innerHTML = '';

        var btn = document.createElement('button');
        btn.textContent = 'Close';
        btn.onclick = close_overlay;
        div.appendChild(btn);
        div.appendChild(document.createElement('br'));
        div.appendChild(document.createElement('br'));

        for (var i = 0; i < imgs.length; ++i) {
            var img = document.createElement('img');
            img.src = imgs[i];
            img.style.width = '100px';
            img.style.height = '100px';
            div.appendChild(img);
        }
        div.style.display = 'block';
    }
</script>
</head>
<body>
<div id="overlay"></div>
<div id="container">
<table>
"##;

pub const CLOSING: &str = "</table>
</div>
</body>
</html>
";

/// Escape text for a double-quoted HTML attribute value.
pub fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}

/// Single-quoted JavaScript string literal for `s`, quotes included.
pub fn js_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}
