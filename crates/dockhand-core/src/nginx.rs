//! Nginx server-block rendering
//!
//! Turns an assembled [`NginxConfig`] into the `server { .. }` text the
//! deployed proxy container runs with. The default `/` location serves the
//! static frontend bundle; every non-blank proxy rule is appended in list
//! order.

use crate::config::{HttpsOption, NginxConfig, ProxyLocation};

/// Render the configuration text for `config`.
///
/// Produces the https variant (443 server block plus an http redirect
/// block) when https is enabled and certificate paths are present,
/// otherwise the plain http variant.
pub fn render(config: &NginxConfig) -> String {
    match (&config.https, &config.https_option) {
        (true, Some(option)) => https_config(config, option),
        _ => http_config(config),
    }
}

/// Plain http server block (port 80).
pub fn http_config(config: &NginxConfig) -> String {
    let mut out = String::new();
    out.push_str("server {\n");
    push_http_listen(&mut out);
    push_server_name(&mut out, &config.domains);
    push_index(&mut out);
    push_default_location(&mut out);
    push_max_body_size(&mut out, config.max_body_size);
    push_locations(&mut out, &config.locations);
    out.push_str("}\n");
    out
}

/// Https server block (port 443) plus an http block that 301-redirects.
pub fn https_config(config: &NginxConfig, option: &HttpsOption) -> String {
    let mut out = String::new();
    out.push_str("server {\n");
    push_https_listen(&mut out, option);
    push_server_name(&mut out, &config.domains);
    push_index(&mut out);
    push_default_location(&mut out);
    push_max_body_size(&mut out, config.max_body_size);
    push_locations(&mut out, &config.locations);
    out.push_str("}\n");

    out.push_str("server {\n");
    push_http_listen(&mut out);
    push_server_name(&mut out, &config.domains);
    out.push_str("    return       301 https://$server_name$request_uri;\n");
    out.push_str("}\n");
    out
}

fn push_http_listen(out: &mut String) {
    out.push_str("    listen 80;\n");
    out.push_str("    listen [::]:80;\n");
}

fn push_https_listen(out: &mut String, option: &HttpsOption) {
    out.push_str("    listen 443 ssl;\n");
    out.push_str("    listen [::]:443 ssl;\n");
    out.push('\n');
    out.push_str(&format!("    ssl_certificate {};\n", option.ssl_certificate));
    out.push_str(&format!(
        "    ssl_certificate_key {};\n",
        option.ssl_certificate_key
    ));
}

fn push_server_name(out: &mut String, domains: &[String]) {
    out.push_str(&format!("    server_name {};\n", domains.join(" ")));
}

fn push_index(out: &mut String) {
    out.push_str("    index index.html index.htm index.nginx-debian.html;\n");
}

fn push_max_body_size(out: &mut String, size: u32) {
    out.push_str(&format!("    client_max_body_size {}M;\n", size));
}

fn push_default_location(out: &mut String) {
    out.push_str("    location / {\n");
    out.push_str("        error_page 405 =200 $uri;\n");
    out.push_str("        root /usr/share/nginx/html;\n");
    out.push_str("        try_files $uri $uri/ /index.html;\n");
    out.push_str("    }\n");
}

fn push_locations(out: &mut String, locations: &[ProxyLocation]) {
    for location in locations {
        if !location.is_blank() {
            push_location(out, location);
        }
    }
}

fn push_location(out: &mut String, location: &ProxyLocation) {
    out.push_str(&format!("    location {} {{\n", location.location));
    out.push_str(&format!("        proxy_pass {};\n", location.url));
    out.push_str("        proxy_http_version 1.1;\n");
    out.push_str("        proxy_set_header Connection \"\";\n");
    out.push('\n');
    out.push_str("        proxy_set_header Host $host;\n");
    out.push_str("        proxy_set_header X-Real-IP $remote_addr;\n");
    out.push_str("        proxy_set_header X-Forwarded-For $proxy_add_x_forwarded_for;\n");
    out.push_str("        proxy_set_header X-Forwarded-Proto $scheme;\n");
    out.push_str("        proxy_set_header X-Forwarded-Host $host;\n");
    out.push_str("        proxy_set_header X-Forwarded-Port $server_port;\n");
    out.push('\n');
    out.push_str("        proxy_read_timeout 300;\n");
    out.push_str("    }\n");
}
